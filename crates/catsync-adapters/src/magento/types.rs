//! Magento GraphQL `products` query shapes.
//!
//! Only the fields that feed canonical fields are modeled; everything else
//! on an item is passed through untouched by the adapter.
//!
//! ### Categories
//! `CategoryInterface` entries carry a numeric `id`, a depth `level` (1 is
//! the catalog root) and a slash `path` of ancestor ids such as `"1/2/34"`.
//! Ancestors are frequently elided from a single product's list, so names
//! are resolved against every category seen in the response.
//!
//! ### Custom attributes
//! `custom_attributesV2.items` on 2.4.7+, a flat `custom_attributes` list
//! with `attribute_code` on older REST-shaped exports.

use serde::Deserialize;
use serde_json::Value;

use crate::category::FlatCategory;
use crate::text::{deserialize_scalar, null_as_default, scalar_text};

#[derive(Debug, Deserialize)]
pub struct MagentoProduct {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub sku: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<ComplexText>,

    #[serde(default)]
    pub short_description: Option<ComplexText>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_attributes: Vec<CustomAttribute>,

    #[serde(default, rename = "custom_attributesV2")]
    pub custom_attributes_v2: Option<CustomAttributes>,

    #[serde(default)]
    pub price_range: Option<PriceRange>,

    /// Boolean or `0`/`1` on REST-shaped exports.
    #[serde(default)]
    pub is_in_stock: Option<Value>,

    /// `IN_STOCK` or `OUT_OF_STOCK`.
    #[serde(default)]
    pub stock_status: Option<String>,

    #[serde(default)]
    pub small_image: Option<MagentoImage>,

    #[serde(default)]
    pub image: Option<MagentoImage>,

    #[serde(default)]
    pub thumbnail: Option<MagentoImage>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<MagentoCategory>,

    #[serde(default)]
    pub canonical_url: Option<String>,

    #[serde(default)]
    pub url_key: Option<String>,

    /// Usually `".html"`.
    #[serde(default)]
    pub url_suffix: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<ConfigurableVariant>,
}

impl MagentoProduct {
    /// Custom attributes from both encodings, V2 first.
    pub fn all_custom_attributes(&self) -> impl Iterator<Item = &CustomAttribute> {
        self.custom_attributes_v2
            .iter()
            .flat_map(|v2| v2.items.iter())
            .chain(self.custom_attributes.iter())
    }

    /// First image URL among `small_image`, `image`, `thumbnail`.
    #[must_use]
    pub fn primary_image_url(&self) -> Option<&str> {
        [&self.small_image, &self.image, &self.thumbnail]
            .into_iter()
            .flatten()
            .filter_map(|image| image.url.as_deref())
            .find(|url| !url.trim().is_empty())
    }
}

/// Rich text wrapper: `{"html": "<p>...</p>"}`.
#[derive(Debug, Deserialize)]
pub struct ComplexText {
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomAttributes {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CustomAttribute>,
}

#[derive(Debug, Deserialize)]
pub struct CustomAttribute {
    #[serde(default, alias = "attribute_code")]
    pub code: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_options: Vec<SelectedOption>,
}

impl CustomAttribute {
    /// `value`, then `label`, then the first selected option's label.
    #[must_use]
    pub fn display_value(&self) -> Option<String> {
        self.value
            .as_ref()
            .and_then(scalar_text)
            .or_else(|| self.label.clone())
            .or_else(|| {
                self.selected_options
                    .iter()
                    .find_map(|option| option.label.clone())
            })
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub minimum_price: Option<ProductPrice>,
}

#[derive(Debug, Deserialize)]
pub struct ProductPrice {
    #[serde(default)]
    pub final_price: Option<Money>,
    #[serde(default)]
    pub regular_price: Option<Money>,
    #[serde(default)]
    pub final_price_excl_tax: Option<Money>,
    #[serde(default)]
    pub regular_price_excl_tax: Option<Money>,
}

#[derive(Debug, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl Money {
    /// Helper for chaining through optional money fields.
    #[must_use]
    pub fn amount(money: Option<&Money>) -> Option<&Value> {
        money.and_then(|m| m.value.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct MagentoImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MagentoCategory {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub path: Option<String>,
}

impl MagentoCategory {
    /// Converts to the hierarchy builder's input. Entries without an id are
    /// dropped; a missing path defaults to the id itself and a missing level
    /// to the path depth.
    #[must_use]
    pub fn into_flat(self) -> Option<FlatCategory> {
        let id = self.id?;
        let path = self.path.filter(|p| !p.trim().is_empty()).unwrap_or_else(|| id.clone());
        let level = self
            .level
            .unwrap_or_else(|| i64::try_from(path.split('/').count()).unwrap_or(i64::MAX));
        Some(FlatCategory {
            id,
            name: self.name.unwrap_or_default(),
            level,
            path,
        })
    }
}

/// One child of a configurable product.
#[derive(Debug, Deserialize)]
pub struct ConfigurableVariant {
    #[serde(default)]
    pub product: Option<VariantProduct>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: Vec<VariantOption>,
}

#[derive(Debug, Deserialize)]
pub struct VariantProduct {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub sku: Option<String>,
}

/// `{"code": "color", "label": "Red"}`
#[derive(Debug, Deserialize)]
pub struct VariantOption {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}
