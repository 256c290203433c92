//! PrestaShop catalog export shapes.
//!
//! ## Observed shape
//!
//! Translatable fields arrive as `{locale -> text}` maps (`localizedNames`,
//! `localizedLinks`, ...). Exports that were serialized from PHP lists can
//! carry these maps as JSON arrays instead; those are kept as raw [`Value`]s
//! here and filtered by the locale policy at conversion time.
//!
//! ### `categories`
//! Pre-grouped by depth. Two encodings are seen in the wild:
//! - keyed levels: `{"lvl0": [...], "lvl1": [...]}`
//! - positional levels: `[[...], [...]]`
//!
//! Every entry carries a precomputed `localizedPaths` map such as
//! `{"en-US": "Men > Shoes"}`.
//!
//! ### `imageUrls`
//! May carry any number of size keys (`small`, `medium`, `large`, `home`);
//! only `small` and `medium` are read.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::category::level_sort_key;
use crate::text::{deserialize_scalar, null_as_default};

/// A single product from `data.products`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestashopProduct {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub remote_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub sku: Option<String>,

    #[serde(default)]
    pub localized_names: Value,

    #[serde(default)]
    pub brand: Option<PrestashopBrand>,

    #[serde(default)]
    pub localized_descriptions: Value,

    #[serde(default)]
    pub localized_short_descriptions: Value,

    /// Product page URL per locale.
    #[serde(default)]
    pub localized_links: Value,

    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: PrestashopCategories,

    #[serde(default)]
    pub image_urls: Option<PrestashopImageUrls>,

    /// Prices are numbers or numeric strings depending on the module version.
    #[serde(default)]
    pub price: Option<Value>,

    #[serde(default)]
    pub base_price: Option<Value>,

    #[serde(default)]
    pub price_tax_excluded: Option<Value>,

    #[serde(default)]
    pub base_price_tax_excluded: Option<Value>,

    /// Boolean, `0`/`1`, or `"true"`/`"false"`.
    #[serde(default)]
    pub in_stock: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<PrestashopFeature>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<PrestashopVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestashopBrand {
    #[serde(default)]
    pub localized_names: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrestashopImageUrls {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
}

/// Category buckets grouped by depth.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum PrestashopCategories {
    Keyed(BTreeMap<String, Vec<PrestashopCategory>>),
    Positional(Vec<Vec<PrestashopCategory>>),
    #[default]
    Absent,
}

impl PrestashopCategories {
    /// Levels ordered shallowest first.
    #[must_use]
    pub fn into_levels(self) -> Vec<Vec<PrestashopCategory>> {
        match self {
            PrestashopCategories::Keyed(levels) => {
                let mut keyed: Vec<(String, Vec<PrestashopCategory>)> = levels.into_iter().collect();
                keyed.sort_by_key(|(name, _)| level_sort_key(name));
                keyed.into_iter().map(|(_, entries)| entries).collect()
            }
            PrestashopCategories::Positional(levels) => levels,
            PrestashopCategories::Absent => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestashopCategory {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub remote_id: Option<String>,
    #[serde(default)]
    pub localized_paths: Value,
}

/// A product feature such as `Material: Leather`, translated per locale.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestashopFeature {
    #[serde(default)]
    pub localized_names: Value,
    #[serde(default)]
    pub localized_values: Value,
}

/// A purchasable combination of a [`PrestashopProduct`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestashopVariant {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub remote_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub sku: Option<String>,

    #[serde(default)]
    pub localized_links: Value,

    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<PrestashopFeature>,
}
