//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::contact::ContactService;

/// Global application state
#[derive(Clone)]
pub struct AppState<C: ContactService> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Contact form service
    pub contact: Arc<C>,
}

impl<C> AppState<C>
where
    C: ContactService,
{
    /// Create a new application state
    pub fn new(contact: C) -> Self {
        Self {
            start_time: Utc::now(),
            contact: Arc::new(contact),
        }
    }
}

impl<C> fmt::Debug for AppState<C>
where
    C: ContactService,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("contact", &"ContactService")
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::domain::contact::tests::MockContactService;

    use super::*;

    pub fn test_state(contact: Option<MockContactService>) -> AppState<MockContactService> {
        AppState {
            start_time: Utc::now(),
            contact: Arc::new(contact.unwrap_or_default()),
        }
    }
}
