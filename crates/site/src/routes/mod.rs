//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                      - Home page (tour list)
//! GET  /about                                 - About page with fortune
//! GET  /tours/request-group-rate              - Group rate request
//! GET  /tours/{slug}                          - Tour detail + add-to-cart form
//! GET  /thank-you                             - Generic form thank-you
//! GET  /health                                - Liveness check
//!
//! # Forms
//! GET  /newsletter                            - Newsletter signup
//! POST /process                               - Generic form submission (JSON or 303)
//!
//! # Photo contest
//! GET  /contest/vacation-photo                - Entry form
//! POST /contest/vacation-photo/{year}/{month} - Multipart entry (303)
//! GET  /contest/vacation-photo/thank-you      - Entry received
//! GET  /contest/vacation-photo/error          - Entry could not be read
//!
//! # Cart
//! GET  /cart                                  - Cart page
//! POST /cart/add                              - Add tour (303 to /cart)
//! POST /cart/waiver                           - Acknowledge waivers (303 to /cart/checkout)
//! GET  /cart/checkout                         - Checkout form (guarded)
//! POST /cart/checkout                         - Complete checkout (guarded)
//! GET  /cart/thank-you                        - Order confirmation
//! GET  /email/cart/thank-you                  - Confirmation email preview
//! ```
//!
//! Unmatched paths and unsupported methods both render the 404 page.

pub mod cart;
pub mod contest;
pub mod errors;
pub mod forms;
pub mod pages;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::{check_guest_counts, require_waivers};
use crate::state::AppState;

/// Create the tour routes router.
pub fn tour_routes() -> Router<AppState> {
    Router::new()
        .route("/request-group-rate", get(pages::request_group_rate))
        .route("/{slug}", get(pages::tour))
}

/// Create the contest routes router.
pub fn contest_routes() -> Router<AppState> {
    Router::new()
        .route("/vacation-photo", get(contest::form))
        .route("/vacation-photo/thank-you", get(contest::thank_you))
        .route("/vacation-photo/error", get(contest::error))
        .route("/vacation-photo/{year}/{month}", post(contest::submit))
}

/// Create the cart routes router.
///
/// The checkout routes sit behind both cart guards; the waiver guard runs
/// first (route layers added later wrap earlier ones).
pub fn cart_routes() -> Router<AppState> {
    let checkout = Router::new()
        .route("/checkout", get(cart::checkout_page).post(cart::checkout))
        .route_layer(middleware::from_fn(check_guest_counts))
        .route_layer(middleware::from_fn(require_waivers));

    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/waiver", post(cart::acknowledge_waivers))
        .route("/thank-you", get(cart::thank_you))
        .merge(checkout)
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/thank-you", get(pages::thank_you))
        .route("/health", get(health))
        .route("/newsletter", get(forms::newsletter))
        .route("/process", post(forms::process))
        .nest("/tours", tour_routes())
        .nest("/contest", contest_routes())
        .nest("/cart", cart_routes())
        .route("/email/cart/thank-you", get(cart::email_thank_you))
        .fallback(errors::not_found)
        .method_not_allowed_fallback(errors::not_found)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
