//! Mail configuration supplied by the embedding application

use std::{fmt, time::Duration};

use crate::domain::communication::email_addresses::EmailAddress;

use super::errors::MailConfigError;

/// Default bound on connecting to and reading from the SMTP server
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// A password that never shows up in logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value
    pub fn new(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Exposes the wrapped value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

/// Where and how contact messages are delivered.
///
/// Immutable once built; `recipients` is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailConfig {
    host: String,
    port: u16,
    username: String,
    password: Secret,
    recipients: Vec<EmailAddress>,
    timeout: Duration,
}

impl MailConfig {
    /// Creates a new mail configuration
    pub fn new<S: AsRef<str>>(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        recipients: &[S],
    ) -> Result<Self, MailConfigError> {
        let host = host.trim();

        if host.is_empty() {
            return Err(MailConfigError::EmptyHost);
        }

        let sender =
            EmailAddress::new(username).map_err(|source| MailConfigError::InvalidSender {
                address: username.to_string(),
                source,
            })?;

        let recipients = recipients
            .iter()
            .map(|raw| {
                EmailAddress::new(raw.as_ref()).map_err(|source| {
                    MailConfigError::InvalidRecipient {
                        address: raw.as_ref().to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if recipients.is_empty() {
            return Err(MailConfigError::NoRecipients);
        }

        Ok(Self {
            host: host.to_string(),
            port,
            username: sender.into(),
            password: Secret::new(password),
            recipients,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Overrides the connection and read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// SMTP host name
    pub fn host(&self) -> &str {
        &self.host
    }

    /// SMTP port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Authentication user, also used as the envelope sender
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Authentication password
    pub fn password(&self) -> &Secret {
        &self.password
    }

    /// Envelope recipients, in order
    pub fn recipients(&self) -> &[EmailAddress] {
        &self.recipients
    }

    /// Connection and read timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::communication::email_addresses::EmailAddressError;

    use super::*;

    #[test]
    fn test_new_mail_config() -> TestResult {
        let config = MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "123456",
            &["me@example.com", "pr@example.com"],
        )?;

        assert_eq!(config.host(), "smtp.example.com");
        assert_eq!(config.port(), 587);
        assert_eq!(config.username(), "app@example.com");
        assert_eq!(config.password().expose(), "123456");
        assert_eq!(
            config
                .recipients()
                .iter()
                .map(EmailAddress::as_str)
                .collect::<Vec<_>>(),
            vec!["me@example.com", "pr@example.com"]
        );
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        Ok(())
    }

    #[test]
    fn test_no_recipients() {
        let result =
            MailConfig::new::<&str>("smtp.example.com", 587, "app@example.com", "p", &[]);

        assert_eq!(result, Err(MailConfigError::NoRecipients));
    }

    #[test]
    fn test_empty_host() {
        let result = MailConfig::new(" ", 587, "app@example.com", "p", &["me@example.com"]);

        assert_eq!(result, Err(MailConfigError::EmptyHost));
    }

    #[test]
    fn test_invalid_recipient() {
        let result = MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "p",
            &["nobody"],
        );

        assert_eq!(
            result,
            Err(MailConfigError::InvalidRecipient {
                address: "nobody".to_string(),
                source: EmailAddressError::InvalidEmailAddress,
            })
        );
    }

    #[test]
    fn test_recipient_without_local_part_is_invalid() {
        let result = MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "p",
            &["me@example.com", "@example.com"],
        );

        assert_eq!(
            result,
            Err(MailConfigError::InvalidRecipient {
                address: "@example.com".to_string(),
                source: EmailAddressError::InvalidEmailAddress,
            })
        );
    }

    #[test]
    fn test_username_must_be_a_sender_address() {
        let result = MailConfig::new("smtp.example.com", 587, "myapp", "p", &["me@example.com"]);

        assert_eq!(
            result,
            Err(MailConfigError::InvalidSender {
                address: "myapp".to_string(),
                source: EmailAddressError::InvalidEmailAddress,
            })
        );
    }

    #[test]
    fn test_password_is_redacted() -> TestResult {
        let config = MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "hunter2",
            &["me@example.com"],
        )?;

        let debug = format!("{:?}", config);

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("********"));

        Ok(())
    }

    #[test]
    fn test_with_timeout() -> TestResult {
        let config = MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "p",
            &["me@example.com"],
        )?
        .with_timeout(Duration::from_secs(5));

        assert_eq!(config.timeout(), Duration::from_secs(5));

        Ok(())
    }
}
