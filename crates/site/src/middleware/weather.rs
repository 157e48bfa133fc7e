//! Weather widget injection.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::services::weather;

/// Middleware that attaches the weather widget data to every request so any
/// rendered page can show it.
pub async fn weather_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(weather::current());
    next.run(request).await
}
