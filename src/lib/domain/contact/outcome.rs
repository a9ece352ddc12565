//! Result of one submission

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::ValidationError;

/// What the presentation layer should show after a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusIndicator {
    /// The message was sent
    Success,

    /// The visitor needs to fix their input
    Warning,

    /// The message could not be delivered
    Error,
}

/// The outcome of submitting a contact form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The message was accepted by the SMTP server
    Success,

    /// A required field was blank; nothing was sent
    ValidationFailed(ValidationError),

    /// The SMTP session failed at some step; the cause has been logged
    DeliveryFailed,
}

impl SendOutcome {
    /// Returns `true` if the message was sent
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success)
    }

    /// Maps the outcome to a status indicator
    pub fn status(&self) -> StatusIndicator {
        match self {
            SendOutcome::Success => StatusIndicator::Success,
            SendOutcome::ValidationFailed(_) => StatusIndicator::Warning,
            SendOutcome::DeliveryFailed => StatusIndicator::Error,
        }
    }

    /// A short message suitable for a popup
    pub fn message(&self) -> String {
        match self {
            SendOutcome::Success => "Your message has been sent.".to_string(),
            SendOutcome::ValidationFailed(err) => {
                let mut message = err.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                format!("{message}.")
            }
            SendOutcome::DeliveryFailed => {
                "Your message could not be sent, please try again later.".to_string()
            }
        }
    }
}

impl From<ValidationError> for SendOutcome {
    fn from(err: ValidationError) -> Self {
        SendOutcome::ValidationFailed(err)
    }
}
