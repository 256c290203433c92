//! PrestaShop catalog export adapter.
//!
//! Reads `data.products`. In strict mode an item without `remoteId` or
//! `sku` aborts the whole call; otherwise it is reported as an item error
//! like any other conversion failure.

pub mod normalize;
pub mod types;

use serde_json::Value;

use catsync_core::TransformOutput;

use crate::adapter::{item_list, run_items, Platform, SourceAdapter};
use crate::error::AdapterError;

const CONTAINER: &str = "data.products";

#[derive(Debug, Clone, Copy, Default)]
pub struct PrestashopAdapter {
    strict: bool,
}

impl PrestashopAdapter {
    /// Lenient adapter: missing identity fields become item errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict adapter: missing identity fields are fatal.
    #[must_use]
    pub fn strict() -> Self {
        Self { strict: true }
    }

    #[must_use]
    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl SourceAdapter for PrestashopAdapter {
    fn platform(&self) -> Platform {
        Platform::Prestashop
    }

    fn transform(&self, payload: &Value) -> Result<TransformOutput, AdapterError> {
        let container = payload
            .get("data")
            .and_then(|data| data.get("products"))
            .ok_or(AdapterError::MissingContainer {
                expected: CONTAINER,
            })?;
        let items = item_list(container, CONTAINER)?;

        tracing::debug!(items = items.len(), strict = self.strict, "transforming prestashop catalog");
        run_items(Platform::Prestashop, items, "remoteId", |index, item| {
            normalize::normalize_product(index, item, self.strict)
        })
    }
}
