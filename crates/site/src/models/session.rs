//! Session-stored state.

use tower_sessions::Session;

use super::cart::Cart;

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}

/// Load the cart from the session, if one has been created.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored cart cannot be
/// deserialized.
pub async fn load_cart(session: &Session) -> Result<Option<Cart>, tower_sessions::session::Error> {
    session.get::<Cart>(keys::CART).await
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the cart cannot be serialized.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}
