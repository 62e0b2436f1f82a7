use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

pub const FORM_NAME: &str = "Property Evaluation";
pub const SOURCE: &str = "Website";
pub const CONSENT_VALUE: &str = "sms_opt_in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Year,
    Value,
    Notes,
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("Please enter the property address.")]
    MissingAddress,
    #[error("Please enter the owner's name and phone or email.")]
    MissingContact,
    #[error("Please check the consent box to submit.")]
    ConsentRequired,
}

/// What the seller has typed so far. Kept across failed attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub address: String,
    pub year: String,
    pub value: String,
    pub notes: String,
    pub contact: String,
    pub consent: bool,
}

impl LeadForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Address => &self.address,
            Field::Year => &self.year,
            Field::Value => &self.value,
            Field::Notes => &self.notes,
            Field::Contact => &self.contact,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Address => self.address = value,
            Field::Year => self.year = value,
            Field::Value => self.value = value,
            Field::Notes => self.notes = value,
            Field::Contact => self.contact = value,
        }
    }

    pub fn validate(&self) -> Result<(), LeadError> {
        if self.address.trim().is_empty() {
            return Err(LeadError::MissingAddress);
        }
        if self.contact.trim().is_empty() {
            return Err(LeadError::MissingContact);
        }
        if !self.consent {
            return Err(LeadError::ConsentRequired);
        }
        Ok(())
    }

    /// Builds the CRM body for one attempt. `page` is the current URL ("" if unknown).
    pub fn to_payload(&self, page: &str, created_at: DateTime<Utc>) -> Result<LeadPayload, LeadError> {
        self.validate()?;
        Ok(LeadPayload {
            form_name: FORM_NAME.to_string(),
            source: SOURCE.to_string(),
            address: self.address.clone(),
            year: self.year.clone(),
            value: self.value.clone(),
            notes: self.notes.clone(),
            contact: self.contact.clone(),
            consent: CONSENT_VALUE.to_string(),
            page: page.to_string(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// JSON body posted to the webhook. Blank optional fields go out as "".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadPayload {
    pub form_name: String,
    pub source: String,
    pub address: String,
    pub year: String,
    pub value: String,
    pub notes: String,
    pub contact: String,
    pub consent: String,
    pub page: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
