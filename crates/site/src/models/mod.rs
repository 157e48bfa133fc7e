//! Domain models for the site.

pub mod cart;
pub mod session;

pub use cart::{BillingInfo, Cart, CartItem, CartItemView, CartView, CartViolation};
pub use session::keys as session_keys;
