//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Adding items and acknowledging
//! waivers follow post-redirect-get; checkout renders the confirmation
//! directly and mails a copy in the background.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use meadowlark_core::{Email, Sku};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;
use crate::models::session::{load_cart, save_cart};
use crate::models::{BillingInfo, Cart, CartView};
use crate::services::{Notification, dispatch};
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub sku: String,
    #[serde(default = "default_guests")]
    pub guests: u32,
    /// Checkbox: present when the visitor accepted the tour's waiver.
    #[serde(default)]
    pub waiver: Option<String>,
}

const fn default_guests() -> u32 {
    1
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub cart: CartView,
}

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub cart: CartView,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/thank_you.html")]
pub struct CartThankYouTemplate {
    pub ctx: PageContext,
    pub cart: CartView,
}

/// HTML confirmation email. Also served at `/email/cart/thank-you`.
#[derive(Template, WebTemplate)]
#[template(path = "email/cart_thank_you.html")]
pub struct CartThankYouEmailHtml {
    pub cart: CartView,
    pub base_url: String,
}

/// Plain text confirmation email.
#[derive(Template)]
#[template(path = "email/cart_thank_you.txt")]
pub struct CartThankYouEmailText {
    pub cart: CartView,
    pub base_url: String,
}

/// Subject line of the confirmation email.
pub const CONFIRMATION_SUBJECT: &str = "Meadowlark Travel Tour Booking";

/// Display the cart, or an empty-cart state when there is none.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session, ctx))]
pub async fn show(session: Session, ctx: PageContext) -> Result<impl IntoResponse> {
    let cart = load_cart(&session)
        .await?
        .map_or_else(CartView::empty, |cart| CartView::from(&cart));

    Ok(CartShowTemplate { ctx, cart })
}

/// Add a tour to the cart.
///
/// Creates the cart on first use. Each call appends a new item, even for a
/// tour already in the cart.
///
/// # Errors
///
/// Returns a validation error for a malformed form, 404 for an unknown SKU,
/// or an internal error if the catalog or session fails.
#[instrument(skip_all)]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;
    let sku = Sku::parse(&form.sku).map_err(|e| AppError::Validation(e.to_string()))?;

    let product = state
        .catalog()
        .find_by_sku(&sku)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {sku}")))?;

    let mut cart = load_cart(&session).await?.unwrap_or_default();
    cart.add(product, form.guests, form.waiver.is_some());
    save_cart(&session, &cart).await?;

    tracing::info!(%sku, guests = form.guests, items = cart.items.len(), "Added to cart");
    Ok(Redirect::to("/cart"))
}

/// Acknowledge the liability waiver for every tour in the cart that needs one.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
#[instrument(skip(session))]
pub async fn acknowledge_waivers(session: Session) -> Result<Redirect> {
    if let Some(mut cart) = load_cart(&session).await? {
        let changed = cart.acknowledge_waivers();
        if changed > 0 {
            save_cart(&session, &cart).await?;
            tracing::info!(changed, "Waivers acknowledged");
        }
    }
    Ok(Redirect::to("/cart/checkout"))
}

/// Display the checkout form.
///
/// Visitors without items are sent back to the cart page.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session, ctx))]
pub async fn checkout_page(session: Session, ctx: PageContext) -> Result<Response> {
    let Some(cart) = load_cart(&session).await?.filter(|cart| !cart.is_empty()) else {
        return Ok(Redirect::to("/cart").into_response());
    };

    Ok(CheckoutTemplate {
        ctx,
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Complete checkout.
///
/// Validates the email, assigns a cart number, stores the billing details,
/// mails the confirmation in the background and renders the thank-you page.
/// A failed validation leaves the cart untouched.
///
/// # Errors
///
/// Returns a validation error for an empty cart or an invalid email, or an
/// internal error if the session or templates fail.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    ctx: PageContext,
    form: std::result::Result<Form<CheckoutForm>, FormRejection>,
) -> Result<impl IntoResponse> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut cart = load_cart(&session)
        .await?
        .filter(|cart| !cart.is_empty())
        .ok_or_else(|| AppError::Validation("Your cart is empty.".to_string()))?;

    let email = Email::parse(&form.email)
        .map_err(|_| AppError::Validation("Please enter a valid email address.".to_string()))?;

    let number = cart
        .check_out(BillingInfo {
            name: form.name.trim().to_string(),
            email: email.clone(),
        })
        .clone();
    save_cart(&session, &cart).await?;
    tracing::info!(cart_number = %number, "Checkout complete");

    let view = CartView::from(&cart);
    let notification = confirmation_email(&view, email, &state.config().base_url)?;
    drop(dispatch(state.notifier(), notification));

    Ok(CartThankYouTemplate { ctx, cart: view })
}

/// Display the confirmation for a checked-out cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(session, ctx))]
pub async fn thank_you(session: Session, ctx: PageContext) -> Result<Response> {
    let Some(cart) = checked_out_cart(&session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };

    Ok(CartThankYouTemplate {
        ctx,
        cart: CartView::from(&cart),
    }
    .into_response())
}

/// Preview the confirmation email for a checked-out cart.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[instrument(skip(state, session))]
pub async fn email_thank_you(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(cart) = checked_out_cart(&session).await? else {
        return Ok(Redirect::to("/cart").into_response());
    };

    Ok(CartThankYouEmailHtml {
        cart: CartView::from(&cart),
        base_url: state.config().base_url.clone(),
    }
    .into_response())
}

async fn checked_out_cart(session: &Session) -> Result<Option<Cart>> {
    Ok(load_cart(session).await?.filter(Cart::is_checked_out))
}

/// Render the confirmation email for `cart`.
fn confirmation_email(cart: &CartView, to: Email, base_url: &str) -> Result<Notification> {
    let html_body = CartThankYouEmailHtml {
        cart: cart.clone(),
        base_url: base_url.to_string(),
    }
    .render()?;
    let text_body = CartThankYouEmailText {
        cart: cart.clone(),
        base_url: base_url.to_string(),
    }
    .render()?;

    Ok(Notification {
        to,
        subject: CONFIRMATION_SUBJECT.to_string(),
        text_body,
        html_body,
    })
}
