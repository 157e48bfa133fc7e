//! Test-mode detection.
//!
//! Browser-side QA scripts are included in a page only outside production,
//! and only when the request asks for them with `?test=1`.

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

use crate::config::Environment;
use crate::state::AppState;

/// Whether the current page should include its test scripts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowTests(pub bool);

#[derive(Debug, Deserialize)]
struct TestParam {
    test: Option<String>,
}

/// Test mode is on only outside production and with `test=1`.
#[must_use]
pub fn show_tests(environment: Environment, test_param: Option<&str>) -> bool {
    !environment.is_production() && test_param == Some("1")
}

/// Middleware that stores [`ShowTests`] in request extensions.
pub async fn test_mode_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let param = Query::<TestParam>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(p)| p.test);
    let enabled = show_tests(state.config().environment, param.as_deref());

    request.extensions_mut().insert(ShowTests(enabled));
    next.run(request).await
}
