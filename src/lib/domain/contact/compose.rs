//! Turns form fields into an outgoing message

use chrono::NaiveDateTime;

use crate::domain::communication::{email_addresses::EmailAddress, mailer::Message};

use super::{config::MailConfig, form_fields::FormFields};

/// Prefix of every subject line
pub const SUBJECT_PREFIX: &str = "via ContactForm: ";

const TIMESTAMP_FORMAT: &str = "%I:%M%p on %B %d, %Y";

/// Formats a local time as e.g. `02:15PM on March 04, 2024`
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the message for `fields` as if submitted at `at`.
///
/// The visitor's address becomes the `Reply-To` when it parses.
pub fn compose(fields: &FormFields, config: &MailConfig, at: &NaiveDateTime) -> Message {
    let body = format!(
        "{email} ({name}) sent a message via ContactForm ({timestamp}):\n\n{message}",
        email = fields.email,
        name = fields.name,
        timestamp = format_timestamp(at),
        message = fields.message,
    );

    Message {
        from: config.username().to_string(),
        to: config.recipients().to_vec(),
        reply_to: EmailAddress::new(&fields.email).ok(),
        subject: format!("{SUBJECT_PREFIX}{}", fields.subject),
        body,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use testresult::TestResult;

    use super::*;

    fn config() -> MailConfig {
        MailConfig::new(
            "smtp.example.com",
            587,
            "app@example.com",
            "secret",
            &["x@example.com", "y@example.com"],
        )
        .unwrap()
    }

    fn march_4th() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(14, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&march_4th()), "02:15PM on March 04, 2024");
    }

    #[test]
    fn test_format_morning_timestamp() {
        let at = NaiveDate::from_ymd_opt(2023, 12, 25)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();

        assert_eq!(format_timestamp(&at), "09:05AM on December 25, 2023");
    }

    #[test]
    fn test_compose() -> TestResult {
        let fields = FormFields::new("Ada", "ada@example.com", "Hi", "Hello");

        let message = compose(&fields, &config(), &march_4th());

        assert_eq!(message.from, "app@example.com");
        assert_eq!(
            message.to,
            vec![
                EmailAddress::new("x@example.com")?,
                EmailAddress::new("y@example.com")?
            ]
        );
        assert_eq!(message.subject, "via ContactForm: Hi");
        assert_eq!(
            message.body,
            "ada@example.com (Ada) sent a message via ContactForm (02:15PM on March 04, 2024):\n\nHello"
        );
        assert_eq!(message.reply_to, Some(EmailAddress::new("ada@example.com")?));

        Ok(())
    }

    #[test]
    fn test_compose_empty_subject() {
        let fields = FormFields::new("Ada", "ada@example.com", "", "Hello");

        let message = compose(&fields, &config(), &march_4th());

        assert_eq!(message.subject, "via ContactForm: ");
    }

    #[test]
    fn test_compose_keeps_text_verbatim() {
        let fields = FormFields::new("", "not-an-address", "  spaced  ", "line one\nline two");

        let message = compose(&fields, &config(), &march_4th());

        assert_eq!(message.subject, "via ContactForm:   spaced  ");
        assert!(message.body.starts_with("not-an-address () sent a message"));
        assert!(message.body.ends_with(":\n\nline one\nline two"));
        assert_eq!(message.reply_to, None);
    }

    #[test]
    fn test_compose_skips_reply_to_smtp_would_refuse() {
        for email in ["@example.com", "ada@.com", "ada@example.com."] {
            let fields = FormFields::new("Ada", email, "Hi", "Hello");

            let message = compose(&fields, &config(), &march_4th());

            assert_eq!(message.reply_to, None, "{email}");
            assert!(message.body.starts_with(email));
        }
    }
}
