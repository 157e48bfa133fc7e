//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::{
    InMemoryCatalog, LogNotifier, Notifier, ProductCatalog, SmtpNotifier,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the external collaborators (catalog and notifier).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    catalog: Arc<dyn ProductCatalog>,
    notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create application state from explicit collaborators.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        catalog: Arc<dyn ProductCatalog>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                notifier,
            }),
        }
    }

    /// Create application state with the demo catalog and the notifier the
    /// configuration selects.
    ///
    /// # Errors
    ///
    /// Returns an error if SMTP is configured but the relay cannot be set up.
    pub fn from_config(config: SiteConfig) -> Result<Self, lettre::transport::smtp::Error> {
        let notifier: Arc<dyn Notifier> = match &config.email {
            Some(email) => {
                tracing::info!(host = %email.smtp_host, "Using SMTP notifier");
                Arc::new(SmtpNotifier::new(email)?)
            }
            None => {
                tracing::warn!("SMTP_HOST not set, emails will only be logged");
                Arc::new(LogNotifier)
            }
        };

        Ok(Self::new(
            config,
            Arc::new(InMemoryCatalog::demo()),
            notifier,
        ))
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.inner.catalog.as_ref()
    }

    /// Get a shared handle to the notifier.
    #[must_use]
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.inner.notifier)
    }
}
