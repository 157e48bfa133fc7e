//! Newsletter signup and generic form processing.
//!
//! `POST /process` serves both plain form posts and AJAX submissions: the
//! client's declared response preference picks between a JSON
//! acknowledgment and a 303 redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::rejection::FormRejection,
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;

/// Newsletter signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter.html")]
pub struct NewsletterTemplate {
    pub ctx: PageContext,
}

/// Generic form submission.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessForm {
    /// Which form was submitted, e.g. `newsletter`.
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// JSON acknowledgment for AJAX submissions.
#[derive(Debug, Serialize)]
pub struct FormAck {
    pub success: bool,
}

/// Response format chosen by content negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preferred {
    Json,
    Html,
}

/// Display the newsletter signup form.
#[instrument(skip(ctx))]
pub async fn newsletter(ctx: PageContext) -> impl IntoResponse {
    NewsletterTemplate { ctx }
}

/// Process a generic form submission.
///
/// The submission is only logged.
///
/// # Errors
///
/// Returns a validation error if the body is not a valid form.
#[instrument(skip_all)]
pub async fn process(
    headers: HeaderMap,
    form: std::result::Result<Form<ProcessForm>, FormRejection>,
) -> Result<Response> {
    let Form(form) = form.map_err(|e| AppError::Validation(e.body_text()))?;

    tracing::info!(
        form = %form.form,
        name = %form.name,
        email = %form.email,
        "Form submitted"
    );

    Ok(match preferred_response(&headers) {
        Preferred::Json => Json(FormAck { success: true }).into_response(),
        Preferred::Html => Redirect::to("/thank-you").into_response(),
    })
}

/// Decide between JSON and HTML for a request.
///
/// AJAX requests (`X-Requested-With: XMLHttpRequest`) always get JSON.
/// Otherwise the `Accept` header is weighed against the offers `json, html`
/// in that order: the higher q-value wins, a tie goes to the earlier offer,
/// and a missing header counts as `*/*`.
#[must_use]
pub fn preferred_response(headers: &HeaderMap) -> Preferred {
    let is_xhr = headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"));
    if is_xhr {
        return Preferred::Json;
    }

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    let json = quality(accept, "application", "json");
    let html = quality(accept, "text", "html");

    if html > json {
        Preferred::Html
    } else {
        Preferred::Json
    }
}

/// Quality the `Accept` header assigns to `kind/subtype`.
///
/// The most specific matching range decides; no match yields 0. Ranges
/// whose `q` is not a number in `0..=1` are ignored.
fn quality(accept: &str, kind: &str, subtype: &str) -> f32 {
    let mut best: Option<(u8, f32)> = None;

    for range in accept.split(',') {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim();
        let Some((range_kind, range_subtype)) = media.split_once('/') else {
            continue;
        };

        let specificity = match (range_kind, range_subtype) {
            (k, s) if k.eq_ignore_ascii_case(kind) && s.eq_ignore_ascii_case(subtype) => 2,
            (k, "*") if k.eq_ignore_ascii_case(kind) => 1,
            ("*", "*") => 0,
            _ => continue,
        };

        let q = match parts.find_map(|param| param.trim().strip_prefix("q=")) {
            Some(value) => match value.trim().parse::<f32>() {
                Ok(q) if (0.0..=1.0).contains(&q) => q,
                _ => continue,
            },
            None => 1.0,
        };

        if best.is_none_or(|(current, _)| specificity > current) {
            best = Some((specificity, q));
        }
    }

    best.map_or(0.0, |(_, q)| q)
}
