//! The contact form workflow: validate, compose, dispatch.

mod compose;
mod config;
mod controller;
mod errors;
mod form_fields;
mod outcome;

pub use compose::{compose, format_timestamp, SUBJECT_PREFIX};
pub use config::{MailConfig, Secret, DEFAULT_TIMEOUT};
pub use controller::{ContactService, FormController};
pub use errors::{MailConfigError, ValidationError};
pub use form_fields::{FormFields, RequiredField};
pub use outcome::{SendOutcome, StatusIndicator};

#[cfg(test)]
pub mod tests {
    pub use super::controller::MockContactService;
}
