//! Core types for Meadowlark Travel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart_number;
pub mod email;
pub mod price;
pub mod sku;

pub use cart_number::CartNumber;
pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use sku::{Sku, SkuError};
