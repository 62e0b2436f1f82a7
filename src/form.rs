use chrono::{DateTime, Utc};
use gloo::console::{error, log};
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config::CrmConfig;
use crate::crm::{CrmClient, CrmError, Transport};
use crate::lead::{Field, LeadError, LeadForm, CONSENT_VALUE, FORM_NAME, SOURCE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] LeadError),
    #[error(transparent)]
    Crm(#[from] CrmError),
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(e) => e.to_string(),
            SubmitError::Crm(e) => e.user_message(),
        }
    }
}

/// Idle and Failed accept a submit; Submitting blocks it; Submitted is final.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Failed(String),
    Submitting,
    Submitted,
}

impl FormStatus {
    pub fn can_submit(&self) -> bool {
        matches!(self, FormStatus::Idle | FormStatus::Failed(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Next status for a submit click. `None` when a submit isn't allowed right now;
    /// an invalid form fails without entering Submitting. Entering Submitting drops any old error.
    pub fn begin(&self, form: &LeadForm) -> Option<FormStatus> {
        if !self.can_submit() {
            return None;
        }
        Some(match form.validate() {
            Ok(()) => FormStatus::Submitting,
            Err(err) => FormStatus::finish(&Err(err.into())),
        })
    }

    pub fn finish(outcome: &Result<(), SubmitError>) -> FormStatus {
        match outcome {
            Ok(()) => FormStatus::Submitted,
            Err(e) => FormStatus::Failed(e.user_message()),
        }
    }
}

/// Validate, stamp, post. Invalid forms never reach the transport.
pub async fn submit_lead<T: Transport>(
    client: &CrmClient<T>,
    form: &LeadForm,
    page: &str,
    now: DateTime<Utc>,
) -> Result<(), SubmitError> {
    let payload = form.to_payload(page, now)?;
    client.post_lead(&payload).await?;
    Ok(())
}

fn current_page_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct FormProps {
    pub config: CrmConfig,
}

#[function_component(PropertyEvaluationForm)]
pub fn property_evaluation_form(props: &FormProps) -> Html {
    let fields = use_state(LeadForm::default);
    let status = use_state(FormStatus::default);
    let client = use_memo(props.config.clone(), |config| CrmClient::new(config.clone()));

    let on_text = |field: Field| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let value = if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                input.value()
            } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                area.value()
            } else {
                return;
            };
            let mut next = (*fields).clone();
            next.set(field, value);
            fields.set(next);
        })
    };

    let on_consent = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.consent = input.checked();
            fields.set(next);
        })
    };

    let onsubmit = {
        let fields = fields.clone();
        let status = status.clone();
        let client = client.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let form = (*fields).clone();
            let Some(next) = status.begin(&form) else {
                return;
            };
            if let Some(msg) = next.error() {
                error!(format!("Lead rejected: {msg}"));
                status.set(next);
                return;
            }

            status.set(next);
            let status = status.clone();
            let client = client.clone();

            spawn_local(async move {
                let outcome = submit_lead(&*client, &form, &current_page_url(), Utc::now()).await;
                match &outcome {
                    Ok(()) => log!("Lead delivered to CRM"),
                    Err(e) => error!(format!("CRM submission failed: {e}")),
                }
                status.set(FormStatus::finish(&outcome));
            });
        })
    };

    if *status == FormStatus::Submitted {
        return html! {
          <div class="thanks">
            <h4>{ "Thanks for submitting!" }</h4>
            <p>{ "We’ll evaluate your property and send you a tailored report shortly." }</p>
          </div>
        };
    }

    let submitting = status.is_submitting();
    let err_block = if let Some(msg) = status.error() {
        html! { <div class="err span2" role="alert">{ msg.to_string() }</div> }
    } else {
        html! {}
    };

    html! {
      <form class="eval-form" onsubmit={onsubmit}>
        <input type="hidden" name="form_name" value={FORM_NAME} />
        <input type="hidden" name="source" value={SOURCE} />

        <div class="span2">
          <label class="label" for="address">{ "Property Address" }</label>
          <input id="address" name="address" required=true placeholder="123 Main St, City, TX"
            value={fields.get(Field::Address).to_string()} oninput={on_text(Field::Address)} />
        </div>
        <div>
          <label class="label" for="year">{ "Year Built" }</label>
          <input id="year" name="year" type="number" placeholder="1990"
            value={fields.get(Field::Year).to_string()} oninput={on_text(Field::Year)} />
        </div>
        <div>
          <label class="label" for="value">{ "Estimated Value" }</label>
          <input id="value" name="value" type="number" placeholder="$200,000"
            value={fields.get(Field::Value).to_string()} oninput={on_text(Field::Value)} />
        </div>
        <div class="span2">
          <label class="label" for="notes">{ "Condition Notes" }</label>
          <textarea id="notes" name="notes" rows="3" placeholder="Roof needs repair, kitchen outdated…"
            value={fields.get(Field::Notes).to_string()} oninput={on_text(Field::Notes)}></textarea>
        </div>
        <div class="span2">
          <label class="label" for="contact">{ "Owner Contact" }</label>
          <input id="contact" name="contact" required=true placeholder="Name & phone/email"
            value={fields.get(Field::Contact).to_string()} oninput={on_text(Field::Contact)} />
        </div>

        <label class="consent span2">
          <input type="checkbox" name="consent" value={CONSENT_VALUE} required=true
            checked={fields.consent} onchange={on_consent} />
          { "By submitting, you agree to receive calls and SMS from ERA Property Solutions. Reply STOP to opt out." }
        </label>

        { err_block }

        <button type="submit" class="btn span2" disabled={submitting}>
          { if submitting { "Submitting…" } else { "Submit for Evaluation" } }
        </button>
      </form>
    }
}
