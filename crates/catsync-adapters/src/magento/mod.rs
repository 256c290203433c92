//! Magento GraphQL catalog adapter.
//!
//! Reads `data.products.items`. Category names are resolved against every
//! category present anywhere in the response, so the index is built before
//! any item is converted.

pub mod normalize;
pub mod types;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use catsync_core::TransformOutput;

use crate::adapter::{item_list, run_items, Platform, SourceAdapter};
use crate::category::CategoryIndex;
use crate::error::AdapterError;

use self::types::MagentoCategory;

const CONTAINER: &str = "data.products";

#[derive(Debug, Clone, Default)]
pub struct MagentoAdapter {
    /// Storefront root used to build product URLs from `url_key`.
    base_url: Option<Url>,
}

impl MagentoAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter resolving relative product URLs against `base_url`.
    ///
    /// An unparseable base is logged and ignored.
    #[must_use]
    pub fn with_base_url(base_url: Option<String>) -> Self {
        let base_url = base_url.and_then(|raw| {
            let normalized = if raw.ends_with('/') {
                raw
            } else {
                format!("{raw}/")
            };
            match Url::parse(&normalized) {
                Ok(url) => Some(url),
                Err(error) => {
                    tracing::warn!(base_url = %normalized, %error, "ignoring invalid magento base URL");
                    None
                }
            }
        });
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }
}

impl SourceAdapter for MagentoAdapter {
    fn platform(&self) -> Platform {
        Platform::Magento
    }

    fn transform(&self, payload: &Value) -> Result<TransformOutput, AdapterError> {
        let items = catalog_items(payload)?;
        let index = category_index(items);
        tracing::debug!(
            items = items.len(),
            categories = index.len(),
            "transforming magento catalog"
        );

        run_items(Platform::Magento, items, "id", |_, item| {
            normalize::normalize_product(item, &index, self.base_url.as_ref())
        })
    }
}

/// Resolves `data.products.items`. A products object without `items`
/// yields an empty list; a bare array is accepted as the item list.
fn catalog_items(payload: &Value) -> Result<&[Value], AdapterError> {
    let products = payload
        .get("data")
        .and_then(|data| data.get("products"))
        .ok_or(AdapterError::MissingContainer {
            expected: CONTAINER,
        })?;

    match products {
        Value::Object(object) => match object.get("items") {
            Some(items) => item_list(items, "data.products.items"),
            None => Ok(&[]),
        },
        other => item_list(other, CONTAINER),
    }
}

/// `id -> name` over the categories of every item in the response.
fn category_index(items: &[Value]) -> CategoryIndex {
    let mut index = CategoryIndex::new();
    let entries = items
        .iter()
        .filter_map(|item| item.get("categories").and_then(Value::as_array))
        .flatten();

    for entry in entries {
        let Ok(category) = MagentoCategory::deserialize(entry) else {
            continue;
        };
        if let Some(flat) = category.into_flat() {
            index.insert(flat.id, flat.name);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn products_without_items_are_empty() {
        let payload = json!({"data": {"products": {"total_count": 0}}});
        assert!(catalog_items(&payload).unwrap().is_empty());
    }

    #[test]
    fn null_items_are_empty() {
        let payload = json!({"data": {"products": {"items": null}}});
        assert!(catalog_items(&payload).unwrap().is_empty());
    }

    #[test]
    fn missing_products_is_fatal() {
        let err = catalog_items(&json!({"data": {}})).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::MissingContainer {
                expected: "data.products"
            }
        ));
    }

    #[test]
    fn non_array_items_is_fatal() {
        let err = catalog_items(&json!({"data": {"products": {"items": {"a": 1}}}})).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn category_index_spans_all_items() {
        let items = vec![
            json!({"categories": [{"id": 10, "name": "Root", "level": 1, "path": "1/10"}]}),
            json!({"categories": [{"id": 20, "name": "Sub", "level": 2, "path": "1/10/20"}]}),
            json!({"categories": [{"id": 10, "name": "Renamed"}, "junk"]}),
            json!("not an object"),
        ];
        let index = category_index(&items);
        assert_eq!(index.len(), 2);
        assert_eq!(index.name("10"), Some("Root"));
        assert_eq!(index.name("20"), Some("Sub"));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let adapter = MagentoAdapter::with_base_url(Some("https://shop.example/store".to_owned()));
        assert_eq!(
            adapter.base_url().map(Url::as_str),
            Some("https://shop.example/store/")
        );
    }

    #[test]
    fn invalid_base_url_is_ignored() {
        let adapter = MagentoAdapter::with_base_url(Some("not a url".to_owned()));
        assert!(adapter.base_url().is_none());
    }
}
