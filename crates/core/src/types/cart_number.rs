//! Cart numbers assigned at checkout.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a cart when checkout succeeds.
///
/// Rendered as the decimal form of a random (v4) UUID, so two checkouts
/// practically never share a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartNumber(String);

impl CartNumber {
    /// Generate a fresh cart number.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().as_u128().to_string())
    }

    /// Returns the cart number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
