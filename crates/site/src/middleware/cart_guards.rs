//! Checkout guards.
//!
//! Two gates run in front of the checkout routes. Each loads the session
//! cart and rejects the request with a validation error when the cart breaks
//! its rule. A missing or empty cart passes both gates; the handlers decide
//! what to do with it.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::models::session::load_cart;

/// Reject carts holding tours whose liability waiver is not acknowledged.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first offending tour.
pub async fn require_waivers(session: Session, request: Request, next: Next) -> Result<Response> {
    if let Some(violation) = load_cart(&session)
        .await?
        .and_then(|cart| cart.waiver_violation())
    {
        tracing::info!(%violation, "Checkout blocked by waiver guard");
        return Err(AppError::Validation(violation.to_string()));
    }
    Ok(next.run(request).await)
}

/// Reject carts holding items with no guests or more guests than the tour
/// allows.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first offending tour.
pub async fn check_guest_counts(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response> {
    if let Some(violation) = load_cart(&session)
        .await?
        .and_then(|cart| cart.guest_violation())
    {
        tracing::info!(%violation, "Checkout blocked by guest count guard");
        return Err(AppError::Validation(violation.to_string()));
    }
    Ok(next.run(request).await)
}
