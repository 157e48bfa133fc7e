//! Session-scoped shopping cart.
//!
//! The whole cart is serialized into the visitor's session under
//! [`super::session::keys::CART`]. Items keep the product snapshot taken
//! when they were added; the catalog is not consulted again.

use meadowlark_core::{CartNumber, CurrencyCode, Email, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::Product;

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
    /// Assigned on successful checkout.
    pub number: Option<CartNumber>,
    /// Set on successful checkout.
    pub billing: Option<BillingInfo>,
}

/// One booked tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub guests: u32,
    #[serde(default)]
    pub waiver_acknowledged: bool,
}

/// Billing details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    /// May be empty; only the email is required.
    pub name: String,
    pub email: Email,
}

/// Reason a cart cannot proceed to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartViolation {
    #[error("{product} requires a liability waiver. Please acknowledge the waiver before checking out.")]
    WaiverRequired { product: String },

    #[error("{product} accepts between 1 and {maximum} guests (you selected {guests}).")]
    InvalidGuests {
        product: String,
        guests: u32,
        maximum: u32,
    },
}

impl Cart {
    /// Append an item. Repeated calls append duplicates.
    pub fn add(&mut self, product: Product, guests: u32, waiver_acknowledged: bool) {
        self.items.push(CartItem {
            product,
            guests,
            waiver_acknowledged,
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_checked_out(&self) -> bool {
        self.number.is_some()
    }

    /// Mark every item that needs a waiver as acknowledged.
    ///
    /// Returns the number of items that changed.
    pub fn acknowledge_waivers(&mut self) -> usize {
        let mut changed = 0;
        for item in &mut self.items {
            if item.product.requires_waiver && !item.waiver_acknowledged {
                item.waiver_acknowledged = true;
                changed += 1;
            }
        }
        changed
    }

    /// First item whose waiver is required but not acknowledged.
    #[must_use]
    pub fn waiver_violation(&self) -> Option<CartViolation> {
        self.items
            .iter()
            .find(|item| item.product.requires_waiver && !item.waiver_acknowledged)
            .map(|item| CartViolation::WaiverRequired {
                product: item.product.name.clone(),
            })
    }

    /// First item whose guest count is zero or above the product's capacity.
    #[must_use]
    pub fn guest_violation(&self) -> Option<CartViolation> {
        self.items
            .iter()
            .find(|item| item.guests == 0 || item.guests > item.product.maximum_guests)
            .map(|item| CartViolation::InvalidGuests {
                product: item.product.name.clone(),
                guests: item.guests,
                maximum: item.product.maximum_guests,
            })
    }

    /// Every violation, for display on the cart page.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.waiver_violation()
            .into_iter()
            .chain(self.guest_violation())
            .map(|v| v.to_string())
            .collect()
    }

    /// Record billing details and assign a fresh cart number.
    pub fn check_out(&mut self, billing: BillingInfo) -> &CartNumber {
        self.billing = Some(billing);
        self.number.insert(CartNumber::generate())
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or_else(CurrencyCode::default, |item| item.product.price.currency_code);
        let amount: Decimal = self
            .items
            .iter()
            .map(|item| item.product.price.times(item.guests).amount)
            .sum();
        Price::new(amount, currency)
    }
}

// =============================================================================
// Template Views
// =============================================================================

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub guests: u32,
    pub price: String,
    pub line_total: String,
    pub needs_waiver: bool,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub number: Option<String>,
    pub billing_name: String,
    pub billing_email: String,
    pub warnings: Vec<String>,
    pub has_pending_waivers: bool,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::default())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemView {
                    sku: item.product.sku.to_string(),
                    slug: item.product.slug.clone(),
                    name: item.product.name.clone(),
                    guests: item.guests,
                    price: item.product.price.display(),
                    line_total: item.product.price.times(item.guests).display(),
                    needs_waiver: item.product.requires_waiver && !item.waiver_acknowledged,
                })
                .collect(),
            total: cart.total().display(),
            number: cart.number.as_ref().map(ToString::to_string),
            billing_name: cart
                .billing
                .as_ref()
                .map(|b| b.name.clone())
                .unwrap_or_default(),
            billing_email: cart
                .billing
                .as_ref()
                .map(|b| b.email.to_string())
                .unwrap_or_default(),
            warnings: cart.warnings(),
            has_pending_waivers: cart.waiver_violation().is_some(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use meadowlark_core::Sku;

    use super::*;

    fn product(sku: &str, maximum_guests: u32, requires_waiver: bool) -> Product {
        Product {
            sku: Sku::parse(sku).unwrap(),
            slug: sku.to_lowercase(),
            name: format!("Tour {sku}"),
            category: "Adventure".to_string(),
            description: String::new(),
            price: Price::from_cents(10_000, CurrencyCode::USD),
            maximum_guests,
            requires_waiver,
        }
    }

    #[test]
    fn test_add_appends_duplicates() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, false), 2, false);
        cart.add(product("A1", 4, false), 2, false);
        assert_eq!(cart.items.len(), 2);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, false), 2, false);
        cart.add(product("B2", 4, false), 1, false);
        assert_eq!(cart.total().display(), "$300.00");
        assert_eq!(Cart::default().total().display(), "$0.00");
    }

    #[test]
    fn test_waiver_violation() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, false), 1, false);
        assert!(cart.waiver_violation().is_none());

        cart.add(product("B2", 4, true), 1, false);
        assert_eq!(
            cart.waiver_violation(),
            Some(CartViolation::WaiverRequired {
                product: "Tour B2".to_string()
            })
        );

        assert_eq!(cart.acknowledge_waivers(), 1);
        assert!(cart.waiver_violation().is_none());
        assert_eq!(cart.acknowledge_waivers(), 0);
    }

    #[test]
    fn test_guest_violation() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, false), 4, false);
        assert!(cart.guest_violation().is_none());

        let mut zero = cart.clone();
        zero.add(product("B2", 4, false), 0, false);
        assert!(matches!(
            zero.guest_violation(),
            Some(CartViolation::InvalidGuests { guests: 0, .. })
        ));

        cart.add(product("C3", 4, false), 5, false);
        assert!(matches!(
            cart.guest_violation(),
            Some(CartViolation::InvalidGuests {
                guests: 5,
                maximum: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_cart_has_no_violations() {
        let cart = Cart::default();
        assert!(cart.waiver_violation().is_none());
        assert!(cart.guest_violation().is_none());
        assert!(cart.warnings().is_empty());
    }

    #[test]
    fn test_check_out_assigns_new_number() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, false), 1, false);
        let billing = BillingInfo {
            name: String::new(),
            email: Email::parse("a@b.com").unwrap(),
        };

        let first = cart.check_out(billing.clone()).clone();
        let second = cart.check_out(billing.clone()).clone();

        assert_ne!(first, second);
        assert_eq!(cart.billing, Some(billing));
        assert!(cart.is_checked_out());
    }

    #[test]
    fn test_session_roundtrip() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, true), 3, true);
        let json = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_view() {
        let mut cart = Cart::default();
        cart.add(product("A1", 4, true), 2, false);
        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].line_total, "$200.00");
        assert!(view.items[0].needs_waiver);
        assert!(view.has_pending_waivers);
        assert_eq!(view.warnings.len(), 1);
        assert!(view.number.is_none());
    }
}
