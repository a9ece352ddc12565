//! Contact form controller

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use tracing::{debug, error, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::Mailer;

use super::{
    compose::compose, config::MailConfig, errors::ValidationError, form_fields::FormFields,
    outcome::SendOutcome,
};

/// Contact service
#[async_trait]
pub trait ContactService: Clone + Send + Sync + 'static {
    /// Validates `fields` and, if they pass, sends them as an email.
    ///
    /// # Arguments
    /// * `fields` - The submitted [`FormFields`].
    ///
    /// # Returns
    /// The [`SendOutcome`] of the submission. Delivery errors are folded
    /// into [`SendOutcome::DeliveryFailed`] and never returned.
    async fn send_message(&self, fields: &FormFields) -> SendOutcome;
}

#[cfg(test)]
mock! {
    pub ContactService {}

    impl Clone for ContactService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ContactService for ContactService {
        async fn send_message(&self, fields: &FormFields) -> SendOutcome;
    }
}

/// Owns the state of one contact form and dispatches its submissions
#[derive(Debug, Clone)]
pub struct FormController<M>
where
    M: Mailer,
{
    config: MailConfig,
    mailer: Arc<M>,
    fields: FormFields,
}

impl<M> FormController<M>
where
    M: Mailer,
{
    /// Creates a controller with empty fields. Does not touch the network.
    pub fn new(config: MailConfig, mailer: M) -> Self {
        Self {
            config,
            mailer: Arc::new(mailer),
            fields: FormFields::default(),
        }
    }

    /// The mail configuration
    pub fn config(&self) -> &MailConfig {
        &self.config
    }

    /// The current form contents
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Mutable access for the embedding UI to apply input events
    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Replaces the form contents
    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    /// Checks that the required fields of `fields` are filled in
    pub fn validate(fields: &FormFields) -> Result<(), ValidationError> {
        fields.validate()
    }

    /// Validates and sends `fields`.
    ///
    /// At most one SMTP session is attempted. The caller decides what to do
    /// with the form afterwards.
    pub async fn submit(&self, fields: &FormFields) -> SendOutcome {
        if let Err(err) = Self::validate(fields) {
            debug!("contact form rejected: {err}");

            return SendOutcome::ValidationFailed(err);
        }

        let message = compose(fields, &self.config, &Local::now().naive_local());

        match self.mailer.send_email(&message).await {
            Ok(()) => {
                info!(
                    recipients = message.to.len(),
                    "contact message sent via {}:{}",
                    self.config.host(),
                    self.config.port()
                );

                SendOutcome::Success
            }
            Err(err) => {
                error!("failed to send contact message: {err:?}");

                SendOutcome::DeliveryFailed
            }
        }
    }

    /// Submits the controller's own fields, clearing them only on success
    pub async fn submit_form(&mut self) -> SendOutcome {
        let outcome = self.submit(&self.fields).await;

        if outcome.is_success() {
            self.fields.clear();
        }

        outcome
    }
}

#[async_trait]
impl<M> ContactService for FormController<M>
where
    M: Mailer,
{
    async fn send_message(&self, fields: &FormFields) -> SendOutcome {
        self.submit(fields).await
    }
}
