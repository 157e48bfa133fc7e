//! Unified error handling with Sentry integration.
//!
//! Handlers return `Result<T, AppError>`. The error stage renders a page for
//! the client and keeps internal details in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::middleware::PageContext;
use crate::routes::errors::{ErrorPageTemplate, NotFoundTemplate, ServerErrorTemplate};
use crate::services::CatalogError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Product catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Submitted data failed validation. The message is shown to the visitor.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(_) | Self::Session(_) | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ctx = PageContext::default();

        match self {
            Self::NotFound(what) => {
                tracing::debug!(%what, "Not found");
                (status, NotFoundTemplate { ctx }).into_response()
            }
            Self::Validation(message) => {
                tracing::info!(%message, "Validation failed");
                (status, ErrorPageTemplate { ctx, message }).into_response()
            }
            // Don't expose internal error details to clients
            err => {
                let event_id = sentry::capture_error(&err);
                tracing::error!(
                    error = %err,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                (status, ServerErrorTemplate { ctx }).into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
