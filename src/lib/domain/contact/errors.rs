//! Error types for the contact form

use thiserror::Error;

use crate::domain::communication::email_addresses::EmailAddressError;

use super::form_fields::RequiredField;

/// One or more required fields were left blank
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("please fill in the required fields: {}", join(.missing))]
pub struct ValidationError {
    missing: Vec<RequiredField>,
}

impl ValidationError {
    /// Creates a validation error for the given blank fields
    pub fn new(missing: Vec<RequiredField>) -> Self {
        Self { missing }
    }

    /// The blank required fields, in form order
    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }
}

fn join(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur when building a [`MailConfig`](super::MailConfig)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MailConfigError {
    /// No SMTP host given
    #[error("SMTP host is empty")]
    EmptyHost,

    /// No recipients given
    #[error("at least one recipient is required")]
    NoRecipients,

    /// The username is not usable as the envelope sender
    #[error("invalid sender \"{address}\": {source}")]
    InvalidSender {
        /// The rejected input
        address: String,

        /// Why it was rejected
        source: EmailAddressError,
    },

    /// A recipient could not be parsed
    #[error("invalid recipient \"{address}\": {source}")]
    InvalidRecipient {
        /// The rejected input
        address: String,

        /// Why it was rejected
        source: EmailAddressError,
    },
}
