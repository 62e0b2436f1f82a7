use gloo_net::http::Request;
use thiserror::Error;

use crate::config::CrmConfig;
use crate::lead::LeadPayload;

pub const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
    #[error("CRM_WEBHOOK_URL is not set. Paste your webhook endpoint into the crm-webhook-url meta tag or set CRM_WEBHOOK_URL at build time.")]
    NotConfigured,
    #[error("CRM request failed: {status} {body}")]
    Status { status: u16, body: String },
    #[error("CRM request failed: {0}")]
    Transport(String),
    #[error("Could not encode submission: {0}")]
    Encode(String),
}

impl CrmError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            CrmError::Transport(text) if text.trim().is_empty() => "Submission failed.".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One POST with the given `Content-Type`. Network-level failures come back as `CrmError::Transport`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, url: &str, content_type: &str, body: String) -> Result<RawResponse, CrmError>;
}

/// Browser fetch via gloo-net. No timeout override, no retries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn post(&self, url: &str, content_type: &str, body: String) -> Result<RawResponse, CrmError> {
        let resp = Request::post(url)
            .header("Content-Type", content_type)
            .body(body)
            .map_err(|e| CrmError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| CrmError::Transport(e.to_string()))?;

        let status = resp.status();
        if resp.ok() {
            // The CRM's reply is not used on success.
            return Ok(RawResponse { status, body: String::new() });
        }
        let body = resp.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

pub fn check_status(resp: RawResponse) -> Result<(), CrmError> {
    if (200..300).contains(&resp.status) {
        Ok(())
    } else {
        Err(CrmError::Status {
            status: resp.status,
            body: resp.body,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrmClient<T = GlooTransport> {
    config: CrmConfig,
    transport: T,
}

impl CrmClient<GlooTransport> {
    pub fn new(config: CrmConfig) -> Self {
        Self::with_transport(config, GlooTransport)
    }
}

impl<T: Transport> CrmClient<T> {
    pub fn with_transport(config: CrmConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exactly one request per call; fails fast without I/O when no endpoint is configured.
    pub async fn post_lead(&self, payload: &LeadPayload) -> Result<(), CrmError> {
        let url = self.config.webhook_url().ok_or(CrmError::NotConfigured)?;
        let body = serde_json::to_string(payload).map_err(|e| CrmError::Encode(e.to_string()))?;
        let resp = self.transport.post(url, CONTENT_TYPE, body).await?;
        check_status(resp)
    }
}


#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::mock::{status, MockTransport};
    use super::*;
    use crate::lead::LeadForm;

    const HOOK: &str = "https://hooks.example/crm/leads";

    fn payload() -> LeadPayload {
        LeadForm {
            address: "9 Elm St, Tyler, TX".into(),
            contact: "Sam sam@example.com".into(),
            consent: true,
            ..LeadForm::default()
        }
        .to_payload("https://eraps.example/", Utc::now())
        .unwrap()
    }

    fn client(replies: Vec<Result<RawResponse, CrmError>>) -> CrmClient<MockTransport> {
        CrmClient::with_transport(CrmConfig::new(HOOK), MockTransport::replying(replies))
    }

    #[test]
    fn any_2xx_is_success() {
        for code in [200, 201, 204, 299] {
            assert_eq!(check_status(RawResponse { status: code, body: "ignored".into() }), Ok(()));
        }
        for code in [199, 300, 404, 500] {
            assert!(check_status(RawResponse { status: code, body: String::new() }).is_err());
        }
    }

    #[tokio::test]
    async fn posts_json_body_once() {
        let client = client(vec![status(200, "{\"id\":\"abc\"}")]);
        let sent = payload();

        client.post_lead(&sent).await.unwrap();

        let calls = client.transport().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, HOOK);
        assert_eq!(calls[0].content_type, "application/json");
        let body: serde_json::Value = serde_json::from_str(&calls[0].body).unwrap();
        assert_eq!(body["address"], "9 Elm St, Tyler, TX");
        assert_eq!(body["form_name"], "Property Evaluation");
        assert_eq!(body["source"], "Website");
        assert_eq!(body["page"], "https://eraps.example/");
        assert_eq!(body["createdAt"], sent.created_at.as_str());
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let client = client(vec![status(500, "Internal Error")]);

        let err = client.post_lead(&payload()).await.unwrap_err();

        assert_eq!(
            err,
            CrmError::Status { status: 500, body: "Internal Error".into() }
        );
        let msg = err.user_message();
        assert!(msg.contains("500") && msg.contains("Internal Error"), "{msg}");
    }

    #[tokio::test]
    async fn unset_endpoint_fails_before_any_request() {
        let client = CrmClient::with_transport(CrmConfig::default(), MockTransport::default());

        let err = client.post_lead(&payload()).await.unwrap_err();

        assert_eq!(err, CrmError::NotConfigured);
        assert!(err.user_message().contains("CRM_WEBHOOK_URL is not set"));
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_reported() {
        let client = client(vec![Err(CrmError::Transport("connection refused".into()))]);

        let err = client.post_lead(&payload()).await.unwrap_err();

        assert_eq!(err.user_message(), "CRM request failed: connection refused");
        assert_eq!(client.transport().calls().len(), 1);
    }

    #[test]
    fn empty_transport_text_uses_fallback() {
        assert_eq!(CrmError::Transport(String::new()).user_message(), "Submission failed.");
    }
}
