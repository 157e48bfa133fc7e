//! Terminal error pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;

/// 404 page.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub ctx: PageContext,
}

/// Generic 500 page. Never carries error details.
#[derive(Template, WebTemplate)]
#[template(path = "500.html")]
pub struct ServerErrorTemplate {
    pub ctx: PageContext,
}

/// Validation error page with a visitor-facing message.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    pub ctx: PageContext,
    pub message: String,
}

/// Fallback for requests no route matched.
#[instrument(skip(ctx))]
pub async fn not_found(uri: axum::http::Uri, ctx: PageContext) -> impl IntoResponse {
    tracing::debug!(%uri, "No route matched");
    (StatusCode::NOT_FOUND, NotFoundTemplate { ctx })
}
