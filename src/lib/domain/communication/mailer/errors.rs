//! Mailer errors

use lettre::address::AddressError;
use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// An error occurred while sending the email
    #[error("An error occurred while sending the email")]
    SendError,

    /// Invalid email address
    #[error("Invalid email address")]
    InvalidEmail,

    /// The server did not offer STARTTLS
    #[error("The SMTP server does not support STARTTLS")]
    StartTlsUnavailable,

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}

impl From<AddressError> for MailerError {
    fn from(_err: AddressError) -> Self {
        MailerError::InvalidEmail
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailerError::UnknownError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use lettre::Address;

    use super::*;

    #[test]
    fn test_address_error_is_invalid_email() {
        let err = "not an address".parse::<Address>().unwrap_err();

        assert!(matches!(MailerError::from(err), MailerError::InvalidEmail));
    }

    #[test]
    fn test_anyhow_error_is_unknown() {
        let err = MailerError::from(anyhow::anyhow!("connection reset"));

        assert_eq!(err.to_string(), "connection reset");
    }
}
