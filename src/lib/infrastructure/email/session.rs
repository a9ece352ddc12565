//! A single SMTP session, step by step

use std::{fmt, time::Duration};

use lettre::{
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{SmtpConnection, TlsParameters},
        extension::ClientId,
    },
};
use tracing::debug;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::MailerError;

const MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Opens SMTP sessions
pub trait SmtpConnector: Send + Sync + 'static {
    /// Connects to `host:port` and reads the greeting
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Box<dyn SmtpSession>, MailerError>;
}

/// An open SMTP session
pub trait SmtpSession: Send {
    /// Upgrades the connection with STARTTLS
    fn starttls(&mut self, host: &str) -> Result<(), MailerError>;

    /// Authenticates with the given credentials
    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), MailerError>;

    /// Runs `MAIL FROM`, `RCPT TO` and `DATA` for one message
    fn send(&mut self, envelope: &Envelope, email: &[u8]) -> Result<(), MailerError>;

    /// Ends the session with `QUIT`
    fn quit(&mut self) -> Result<(), MailerError>;

    /// Drops the connection without a `QUIT`
    fn abort(&mut self);
}

#[cfg(test)]
mock! {
    pub SmtpConnector {}

    impl SmtpConnector for SmtpConnector {
        fn connect(&self, host: &str, port: u16, timeout: Duration) -> Result<Box<dyn SmtpSession>, MailerError>;
    }
}

#[cfg(test)]
mock! {
    pub SmtpSession {}

    impl SmtpSession for SmtpSession {
        fn starttls(&mut self, host: &str) -> Result<(), MailerError>;
        fn authenticate(&mut self, credentials: &Credentials) -> Result<(), MailerError>;
        fn send(&mut self, envelope: &Envelope, email: &[u8]) -> Result<(), MailerError>;
        fn quit(&mut self) -> Result<(), MailerError>;
        fn abort(&mut self);
    }
}

/// Everything needed to run one delivery
#[derive(Clone)]
pub struct Delivery {
    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: u16,

    /// Connection and read timeout
    pub timeout: Duration,

    /// AUTH credentials
    pub credentials: Credentials,

    /// `MAIL FROM` / `RCPT TO` addresses
    pub envelope: Envelope,

    /// The formatted message
    pub email: Vec<u8>,
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .field("credentials", &"********")
            .field("envelope", &self.envelope)
            .field("email", &format_args!("{} bytes", self.email.len()))
            .finish()
    }
}

/// Runs one complete session: connect, STARTTLS, AUTH, send, QUIT.
///
/// Any failure after connecting aborts the connection.
pub fn deliver(connector: &dyn SmtpConnector, delivery: &Delivery) -> Result<(), MailerError> {
    let mut session = connector.connect(&delivery.host, delivery.port, delivery.timeout)?;

    let result = run_session(session.as_mut(), delivery);

    if result.is_err() {
        session.abort();
    }

    result
}

fn run_session(session: &mut dyn SmtpSession, delivery: &Delivery) -> Result<(), MailerError> {
    session.starttls(&delivery.host)?;
    debug!("STARTTLS negotiated with {}", delivery.host);

    session.authenticate(&delivery.credentials)?;
    debug!("authenticated with {}", delivery.host);

    session.send(&delivery.envelope, &delivery.email)?;
    session.quit()
}

/// Connects with lettre's blocking [`SmtpConnection`]
#[derive(Debug, Clone)]
pub struct LettreConnector {
    hello_name: ClientId,
    verify_tls: bool,
}

impl LettreConnector {
    /// Creates a connector; `verify_tls` controls certificate checking
    pub fn new(verify_tls: bool) -> Self {
        Self {
            hello_name: ClientId::default(),
            verify_tls,
        }
    }
}

impl Default for LettreConnector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SmtpConnector for LettreConnector {
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Box<dyn SmtpSession>, MailerError> {
        debug!("connecting to {host}:{port}");

        let connection =
            SmtpConnection::connect((host, port), Some(timeout), &self.hello_name, None, None)?;

        Ok(Box::new(LettreSession {
            connection,
            hello_name: self.hello_name.clone(),
            verify_tls: self.verify_tls,
        }))
    }
}

struct LettreSession {
    connection: SmtpConnection,
    hello_name: ClientId,
    verify_tls: bool,
}

impl fmt::Debug for LettreSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LettreSession")
            .field("hello_name", &self.hello_name)
            .field("verify_tls", &self.verify_tls)
            .field("encrypted", &self.connection.is_encrypted())
            .finish()
    }
}

impl SmtpSession for LettreSession {
    fn starttls(&mut self, host: &str) -> Result<(), MailerError> {
        if !self.connection.can_starttls() {
            return Err(MailerError::StartTlsUnavailable);
        }

        let parameters = TlsParameters::builder(host.to_string())
            .dangerous_accept_invalid_certs(!self.verify_tls)
            .build()?;

        self.connection.starttls(&parameters, &self.hello_name)?;

        Ok(())
    }

    fn authenticate(&mut self, credentials: &Credentials) -> Result<(), MailerError> {
        self.connection.auth(MECHANISMS, credentials)?;

        Ok(())
    }

    fn send(&mut self, envelope: &Envelope, email: &[u8]) -> Result<(), MailerError> {
        self.connection.send(envelope, email)?;

        Ok(())
    }

    fn quit(&mut self) -> Result<(), MailerError> {
        self.connection.quit()?;

        Ok(())
    }

    fn abort(&mut self) {
        self.connection.abort();
    }
}
