use gloo::console::log;

/// `<meta name="crm-webhook-url" content="...">` in index.html.
pub const WEBHOOK_META_NAME: &str = "crm-webhook-url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    MetaTag,
    BuildEnv,
    Unset,
}

/// Where leads get posted. Resolved once when the page mounts, read-only after that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrmConfig {
    webhook_url: String,
}

impl CrmConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into().trim().to_string(),
        }
    }

    /// `None` while the operator hasn't pasted an endpoint yet.
    pub fn webhook_url(&self) -> Option<&str> {
        if self.webhook_url.is_empty() {
            None
        } else {
            Some(&self.webhook_url)
        }
    }

    /// First non-blank value wins: meta tag, then the build-time env var.
    pub fn resolve(meta: Option<&str>, build_env: Option<&str>) -> (Self, ConfigSource) {
        let pick = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        if let Some(url) = pick(meta) {
            return (Self::new(url), ConfigSource::MetaTag);
        }
        if let Some(url) = pick(build_env) {
            return (Self::new(url), ConfigSource::BuildEnv);
        }
        (Self::default(), ConfigSource::Unset)
    }

    pub fn from_page() -> Self {
        let meta = meta_content(WEBHOOK_META_NAME);
        let (config, source) = Self::resolve(meta.as_deref(), option_env!("CRM_WEBHOOK_URL"));
        match source {
            ConfigSource::MetaTag => log!("CRM webhook: set (meta tag)"),
            ConfigSource::BuildEnv => log!("CRM webhook: set (CRM_WEBHOOK_URL)"),
            ConfigSource::Unset => log!("CRM webhook: unset, submissions will fail"),
        }
        config
    }
}

fn meta_content(name: &str) -> Option<String> {
    let doc = web_sys::window()?.document()?;
    let el = doc
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()??;
    el.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_tag_beats_build_env() {
        let (cfg, source) = CrmConfig::resolve(Some("https://hooks.example/meta"), Some("https://hooks.example/env"));
        assert_eq!(source, ConfigSource::MetaTag);
        assert_eq!(cfg.webhook_url(), Some("https://hooks.example/meta"));
    }

    #[test]
    fn blank_meta_falls_back_to_build_env() {
        let (cfg, source) = CrmConfig::resolve(Some("   "), Some(" https://hooks.example/env "));
        assert_eq!(source, ConfigSource::BuildEnv);
        assert_eq!(cfg.webhook_url(), Some("https://hooks.example/env"));
    }

    #[test]
    fn nothing_set_means_unset() {
        let (cfg, source) = CrmConfig::resolve(None, Some(""));
        assert_eq!(source, ConfigSource::Unset);
        assert_eq!(cfg.webhook_url(), None);
        assert_eq!(CrmConfig::new("  ").webhook_url(), None);
    }
}
