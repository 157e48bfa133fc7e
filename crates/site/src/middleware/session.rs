//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions.
//!
//! `MemoryStore` checks expiry when a session is loaded but never deletes
//! expired records, so abandoned carts stay in memory until the process
//! restarts. A store implementing `ExpiredDeletion` is needed before the
//! site can run for long periods.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::time::Duration};

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "meadowlark_session";

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &SiteConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(session_expiry(config))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Sessions expire after `SESSION_EXPIRY_HOURS` without a request.
fn session_expiry(config: &SiteConfig) -> Expiry {
    Expiry::OnInactivity(Duration::hours(config.session_expiry_hours))
}
