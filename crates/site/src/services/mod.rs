//! Services the request handlers call into.
//!
//! - `catalog` - product lookup by SKU or slug
//! - `email` - fire-and-forget notifications (SMTP or log)
//! - `fortune` - random fortune for the about page
//! - `weather` - fixed weather widget data

pub mod catalog;
pub mod email;
pub mod fortune;
pub mod weather;

pub use catalog::{CatalogError, InMemoryCatalog, Product, ProductCatalog};
pub use email::{LogNotifier, Notification, Notifier, NotifyError, SmtpNotifier, dispatch};
