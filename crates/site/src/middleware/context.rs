//! Shared rendering context.
//!
//! Every page template receives a [`PageContext`] assembled from what the
//! earlier middleware stages left in the request extensions.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::test_mode::ShowTests;
use crate::services::weather::WeatherWidget;

/// Data the base layout needs on every page.
#[derive(Clone, Debug, Default)]
pub struct PageContext {
    pub show_tests: bool,
    pub weather: WeatherWidget,
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let show_tests = parts
            .extensions
            .get::<ShowTests>()
            .copied()
            .unwrap_or_default();

        let weather = parts.extensions.get::<WeatherWidget>().cloned().unwrap_or_else(|| {
            tracing::warn!("Weather data not found in request extensions - middleware may be misconfigured");
            WeatherWidget::default()
        });

        Ok(Self {
            show_tests: show_tests.0,
            weather,
        })
    }
}
