//! Source adapters that turn platform catalog exports into canonical products.
//!
//! Each adapter validates the payload's top-level container (fatal when
//! missing), then converts items one by one. A failing item becomes an
//! [`ItemError`](catsync_core::ItemError) and never aborts the batch.

pub mod adapter;
pub mod category;
pub mod error;
pub mod magento;
pub mod prestashop;
pub mod shopify;
pub mod text;

pub use adapter::{adapter_for, AdapterSettings, Platform, SourceAdapter};
pub use error::AdapterError;
pub use magento::MagentoAdapter;
pub use prestashop::PrestashopAdapter;
pub use shopify::ShopifyAdapter;
