//! The values entered into a contact form

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::ValidationError;

/// A field the visitor must fill in before a message can be sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    /// The visitor's e-mail address
    Email,

    /// The message body
    Message,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Email => write!(f, "e-mail"),
            RequiredField::Message => write!(f, "message"),
        }
    }
}

/// The four text fields of a contact form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct FormFields {
    /// The visitor's name
    #[schema(example = "Ada")]
    pub name: String,

    /// The visitor's e-mail address (required)
    #[schema(example = "ada@example.com")]
    pub email: String,

    /// The subject line entered by the visitor
    #[schema(example = "Hi")]
    pub subject: String,

    /// The message body (required)
    #[schema(example = "Hello")]
    pub message: String,
}

impl FormFields {
    /// Creates a new set of form fields
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    /// Checks that every required field holds something other than whitespace.
    ///
    /// Name and subject are optional. The returned error names each blank
    /// required field, in form order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<RequiredField> = [
            (RequiredField::Email, &self.email),
            (RequiredField::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(missing))
        }
    }

    /// Returns `true` when every field is empty
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.subject.is_empty()
            && self.message.is_empty()
    }

    /// Empties every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
