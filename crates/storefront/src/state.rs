//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::email::EmailService;
use crate::services::stripe::{StripeClient, StripeError};
use crate::store::Store;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("stripe client error: {0}")]
    Stripe(#[from] StripeError),
    #[error("email transport error: {0}")]
    Email(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: configuration, the record store, and the external
/// service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Store,
    stripe: StripeClient,
    mailer: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The store is injected so callers (and tests) control what it holds.
    /// The email service is only built when SMTP is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe client or SMTP transport cannot be
    /// constructed.
    pub fn new(config: StorefrontConfig, store: Store) -> Result<Self, StateError> {
        let stripe = StripeClient::new(&config.stripe)?;
        let mailer = match &config.email {
            Some(email_config) => Some(EmailService::new(email_config)?),
            None => None,
        };

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                stripe,
                mailer,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the Stripe API client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get the email service, if SMTP is configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&EmailService> {
        self.inner.mailer.as_ref()
    }
}
