//! Content page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;
use crate::services::{Product, fortune};
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub tours: Vec<TourView>,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub ctx: PageContext,
    pub fortune: &'static str,
    pub page_test_script: &'static str,
}

/// Tour detail template with the add-to-cart form.
#[derive(Template, WebTemplate)]
#[template(path = "tours/detail.html")]
pub struct TourTemplate {
    pub ctx: PageContext,
    pub tour: TourView,
    pub page_test_script: &'static str,
}

/// Group rate request template.
#[derive(Template, WebTemplate)]
#[template(path = "tours/request_group_rate.html")]
pub struct RequestGroupRateTemplate {
    pub ctx: PageContext,
    pub page_test_script: &'static str,
}

/// Generic thank-you page shown after a form submission.
#[derive(Template, WebTemplate)]
#[template(path = "thank_you.html")]
pub struct ThankYouTemplate {
    pub ctx: PageContext,
}

/// Tour display data for templates.
#[derive(Clone, Debug)]
pub struct TourView {
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: String,
    pub maximum_guests: u32,
    pub requires_waiver: bool,
}

impl From<&Product> for TourView {
    fn from(product: &Product) -> Self {
        Self {
            sku: product.sku.to_string(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            maximum_guests: product.maximum_guests,
            requires_waiver: product.requires_waiver,
        }
    }
}

/// Display the home page.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
#[instrument(skip(state, ctx))]
pub async fn home(State(state): State<AppState>, ctx: PageContext) -> Result<impl IntoResponse> {
    let tours = state.catalog().all().await?;
    Ok(HomeTemplate {
        ctx,
        tours: tours.iter().map(TourView::from).collect(),
    })
}

/// Display the about page with a random fortune.
#[instrument(skip(ctx))]
pub async fn about(ctx: PageContext) -> impl IntoResponse {
    AboutTemplate {
        ctx,
        fortune: fortune::get_fortune(),
        page_test_script: "/qa/tests-about.js",
    }
}

/// Display a tour.
///
/// # Errors
///
/// Returns 404 if no tour has this slug.
#[instrument(skip(state, ctx))]
pub async fn tour(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ctx: PageContext,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tour {slug}")))?;

    Ok(TourTemplate {
        ctx,
        tour: TourView::from(&product),
        page_test_script: "/qa/tests-tour.js",
    })
}

/// Display the group rate request page.
#[instrument(skip(ctx))]
pub async fn request_group_rate(ctx: PageContext) -> impl IntoResponse {
    RequestGroupRateTemplate {
        ctx,
        page_test_script: "/qa/tests-crosspage.js",
    }
}

/// Display the generic thank-you page.
#[instrument(skip(ctx))]
pub async fn thank_you(ctx: PageContext) -> impl IntoResponse {
    ThankYouTemplate { ctx }
}
