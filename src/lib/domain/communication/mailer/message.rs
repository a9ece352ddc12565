//! Email message

use crate::domain::communication::email_addresses::EmailAddress;

/// A single plain-text email, ready to hand to a [`Mailer`](super::Mailer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Envelope sender and `From` header
    pub from: String,

    /// Envelope recipients and `To` header, in order
    pub to: Vec<EmailAddress>,

    /// Optional `Reply-To` header
    pub reply_to: Option<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,
}
