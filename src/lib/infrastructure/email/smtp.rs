//! SMTP email service implementation

use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    address::Envelope,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address,
};
use tracing::debug;

use crate::domain::{
    communication::mailer::{Mailer, MailerError, Message},
    contact::MailConfig,
};

use super::session::{deliver, Delivery, LettreConnector, SmtpConnector};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username, also used as the sender address
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Comma-separated list of addresses that receive contact messages
    #[clap(long, env = "SMTP_RECIPIENTS", value_delimiter = ',')]
    pub recipients: Vec<String>,

    /// Connection and read timeout in seconds
    #[clap(long, env = "SMTP_TIMEOUT", default_value = "20")]
    pub timeout: u64,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,
}

impl SMTPConfig {
    /// Builds the domain mail configuration
    pub fn mail_config(&self) -> Result<MailConfig> {
        let config = MailConfig::new(
            &self.host,
            self.port,
            &self.username,
            &self.password,
            self.recipients.as_slice(),
        )
        .context("invalid SMTP configuration")?;

        Ok(config.with_timeout(Duration::from_secs(self.timeout)))
    }
}

/// SMTP mailer
#[derive(Debug)]
pub struct SMTPMailer<C = LettreConnector>
where
    C: SmtpConnector,
{
    config: MailConfig,
    connector: Arc<C>,
}

impl<C> Clone for SMTPMailer<C>
where
    C: SmtpConnector,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            connector: Arc::clone(&self.connector),
        }
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(config: MailConfig, verify_tls: bool) -> Self {
        Self::with_connector(config, LettreConnector::new(verify_tls))
    }
}

impl<C> SMTPMailer<C>
where
    C: SmtpConnector,
{
    /// Create a new SMTP mailer that opens sessions through `connector`
    pub fn with_connector(config: MailConfig, connector: C) -> Self {
        Self {
            config,
            connector: Arc::new(connector),
        }
    }

    /// Formats `message` and pairs it with its envelope and credentials
    fn prepare(&self, message: &Message) -> Result<Delivery, MailerError> {
        let from: Address = message.from.parse()?;
        let to = message
            .to
            .iter()
            .map(|address| address.as_str().parse::<Address>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = lettre::Message::builder()
            .from(Mailbox::new(None, from.clone()))
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN);

        for address in &to {
            builder = builder.to(Mailbox::new(None, address.clone()));
        }

        // Reply-To is optional; an address lettre refuses is left out.
        if let Some(reply_to) = message
            .reply_to
            .as_ref()
            .and_then(|address| address.as_str().parse::<Address>().ok())
        {
            builder = builder.reply_to(Mailbox::new(None, reply_to));
        }

        let envelope = Envelope::new(Some(from), to)?;
        let email = builder
            .envelope(envelope.clone())
            .body(message.body.clone())?;

        Ok(Delivery {
            host: self.config.host().to_string(),
            port: self.config.port(),
            timeout: self.config.timeout(),
            credentials: Credentials::new(
                self.config.username().to_string(),
                self.config.password().expose().to_string(),
            ),
            envelope,
            email: email.formatted(),
        })
    }
}

#[async_trait]
impl<C> Mailer for SMTPMailer<C>
where
    C: SmtpConnector,
{
    async fn send_email(&self, message: &Message) -> Result<(), MailerError> {
        let delivery = self.prepare(message)?;
        let connector = Arc::clone(&self.connector);

        debug!(
            "sending \"{}\" to {} recipient(s)",
            message.subject,
            message.to.len()
        );

        match tokio::task::spawn_blocking(move || deliver(connector.as_ref(), &delivery)).await {
            Ok(result) => result,
            Err(e) => Err(MailerError::UnknownError(anyhow!(
                "SMTP worker did not finish: {e}"
            ))),
        }
    }
}
