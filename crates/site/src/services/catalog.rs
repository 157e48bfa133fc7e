//! Product catalog lookups.
//!
//! Handlers only see the [`ProductCatalog`] trait. The site ships with an
//! [`InMemoryCatalog`] seeded with the demo tours; a document store can be
//! swapped in behind the same trait.

use async_trait::async_trait;
use meadowlark_core::{CurrencyCode, Price, Sku};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bookable tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    /// URL segment under `/tours/`.
    pub slug: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Price per guest.
    pub price: Price,
    pub maximum_guests: u32,
    pub requires_waiver: bool,
}

/// Errors raised by a catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Look up a product by SKU. `Ok(None)` means the SKU is unknown.
    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, CatalogError>;

    /// Look up a product by its `/tours/{slug}` segment.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError>;

    /// All products, in display order.
    async fn all(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Catalog of the tours the demo site sells.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            tour(
                "HR199",
                "hood-river",
                "Hood River Day Trip",
                "Day Trip",
                "Spend a day sailing on the Columbia and enjoying craft beers in Hood River!",
                9_995,
                16,
                false,
            ),
            tour(
                "OC39",
                "oregon-coast",
                "Oregon Coast Getaway",
                "Weekend Getaway",
                "Enjoy the ocean air and quaint coastal towns!",
                26_995,
                8,
                false,
            ),
            tour(
                "B99",
                "rock-climbing-bend",
                "Rock Climbing in Bend",
                "Adventure",
                "Experience the thrill of climbing in the high desert.",
                28_995,
                4,
                true,
            ),
        ])
    }
}

#[allow(clippy::too_many_arguments)]
fn tour(
    sku: &str,
    slug: &str,
    name: &str,
    category: &str,
    description: &str,
    price_cents: i64,
    maximum_guests: u32,
    requires_waiver: bool,
) -> Product {
    Product {
        // Seed SKUs are literals that satisfy `Sku::parse`.
        sku: Sku::parse(sku).unwrap_or_else(|_| unreachable!("invalid seed sku {sku}")),
        slug: slug.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        price: Price::from_cents(price_cents, CurrencyCode::USD),
        maximum_guests,
        requires_waiver,
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| &p.sku == sku).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}
