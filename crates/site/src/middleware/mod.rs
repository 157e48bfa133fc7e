//! HTTP middleware stack for the site.
//!
//! # Pipeline Order (outermost first)
//!
//! 1. Trace, Sentry and panic catcher
//! 2. Static assets (`ServeDir`, short-circuits on a file hit)
//! 3. Request ID
//! 4. Session layer (tower-sessions, in-memory store)
//! 5. Test mode (`?test=1` outside production)
//! 6. Weather widget injection
//! 7. Cart guards (checkout routes only): waivers, then guest counts
//!
//! The layers are assembled in [`crate::app::build_app`].

pub mod cart_guards;
pub mod context;
pub mod request_id;
pub mod session;
pub mod test_mode;
pub mod weather;

pub use cart_guards::{check_guest_counts, require_waivers};
pub use context::PageContext;
pub use request_id::{RequestId, request_id_middleware};
pub use session::create_session_layer;
pub use test_mode::{ShowTests, show_tests, test_mode_middleware};
pub use weather::weather_middleware;
