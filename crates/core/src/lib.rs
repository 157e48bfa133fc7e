//! Meadowlark Core - Shared domain types.
//!
//! This crate provides the small set of validated types the site passes
//! between its request handlers, session store and notifier:
//!
//! - [`Email`] - an address matched against a fixed pattern
//! - [`Sku`] - a product stock-keeping unit
//! - [`Price`] - decimal price with a currency
//! - [`CartNumber`] - identifier assigned to a cart at checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no session access.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
