//! Shopify GraphQL catalog adapter.

pub mod normalize;
pub mod types;

use serde_json::Value;

use catsync_core::TransformOutput;

use crate::adapter::{item_list, run_items, Platform, SourceAdapter};
use crate::error::AdapterError;

const CONTAINER: &str = "products";

/// Stand-in for an edge without a `node`, reported as an invalid item.
static MISSING_NODE: Value = Value::Null;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShopifyAdapter;

impl ShopifyAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SourceAdapter for ShopifyAdapter {
    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    fn transform(&self, payload: &Value) -> Result<TransformOutput, AdapterError> {
        let items = catalog_items(payload)?;
        tracing::debug!(items = items.len(), "transforming shopify catalog");
        run_items(Platform::Shopify, items, "id", |_, item| {
            normalize::normalize_product(item)
        })
    }
}

/// Resolves `products` (or `data.products`) into its product nodes.
///
/// The container may be a plain array or a GraphQL connection.
fn catalog_items(payload: &Value) -> Result<Vec<&Value>, AdapterError> {
    let container = payload
        .get(CONTAINER)
        .or_else(|| payload.get("data").and_then(|data| data.get(CONTAINER)))
        .ok_or(AdapterError::MissingContainer {
            expected: CONTAINER,
        })?;

    match container {
        Value::Object(connection) if connection.contains_key("edges") => {
            let edges = item_list(&connection["edges"], "products.edges")?;
            Ok(edges
                .iter()
                .map(|edge| edge.get("node").unwrap_or(&MISSING_NODE))
                .collect())
        }
        Value::Object(connection) if connection.contains_key("nodes") => {
            Ok(item_list(&connection["nodes"], "products.nodes")?.iter().collect())
        }
        other => Ok(item_list(other, CONTAINER)?.iter().collect()),
    }
}
