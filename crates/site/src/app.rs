//! Router assembly.
//!
//! Builds the full request pipeline around the route table. Layers are
//! listed innermost first, so each `.layer` call below wraps everything
//! above it; see [`crate::middleware`] for the resulting order.

use std::any::Any;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    PageContext, create_session_layer, request_id_middleware, test_mode_middleware,
    weather_middleware,
};
use crate::routes;
use crate::routes::errors::ServerErrorTemplate;
use crate::state::AppState;

/// Build the application router.
pub fn build_app(state: AppState) -> Router {
    let config = state.config().clone();

    let site = routes::routes()
        .layer(middleware::from_fn(weather_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            test_mode_middleware,
        ))
        .layer(create_session_layer(&config))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state);

    // Files under the public root win over routes; everything else,
    // including non-GET requests, falls through to the site router.
    let static_files = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(site);

    Router::new()
        .fallback_service(static_files)
        .layer(CatchPanicLayer::custom(handle_panic))
        // Sentry layers (outside the routes for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Turn a handler panic into the generic 500 page.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ServerErrorTemplate {
            ctx: PageContext::default(),
        },
    )
        .into_response()
}
