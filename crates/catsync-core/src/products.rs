use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::locale::{is_blank, localized_field_name, Localized, DEFAULT_LOCALE};

/// JSON names of the typed canonical fields. Anything else on a document
/// lives in [`CanonicalProduct::extra`].
pub const CANONICAL_FIELDS: &[&str] = &[
    "id",
    "sku",
    "name",
    "brand",
    "description",
    "descriptionShort",
    "categoryDefault",
    "categories",
    "productUrl",
    "imageUrl",
    "price",
    "basePrice",
    "priceTaxExcluded",
    "basePriceTaxExcluded",
    "inStock",
    "variants",
    "features",
];

/// A product in the unified catalog shape every source adapter converges on.
///
/// Locale-suffixed siblings of the translatable fields (`name_lt-LT`,
/// `categories_de-DE`, ...) and any pass-through source fields are kept in
/// `extra`, which is flattened into the document on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    pub id: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_short: Option<String>,
    /// Most relevant single category, as chosen by the source adapter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_default: Option<String>,
    /// Ordered `"A > B > C"` hierarchy paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrls>,
    /// Decimal prices rendered as strings, e.g. `"12.99"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_tax_excluded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price_tax_excluded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ProductVariant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<NameValue>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalProduct {
    #[must_use]
    pub fn new(id: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sku: sku.into(),
            ..Self::default()
        }
    }

    /// Applies the locale expansion policy to `values`.
    ///
    /// Every non-default locale is written into `extra` as `base_<locale>`.
    /// The default-locale value is returned for the caller to store in the
    /// matching typed field. Blank values are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if a value cannot be converted to JSON.
    pub fn extend_localized<T: Serialize>(
        &mut self,
        base: &str,
        values: Localized<T>,
    ) -> Result<Option<T>, serde_json::Error> {
        let mut default = None;
        for (locale, value) in values {
            let json = serde_json::to_value(&value)?;
            if is_blank(&json) {
                continue;
            }
            if locale == DEFAULT_LOCALE {
                default = Some(value);
            } else {
                self.extra.insert(localized_field_name(base, &locale), json);
            }
        }
        Ok(default)
    }

    /// Returns the JSON object view of this product, as shipped to the
    /// indexing service and consumed by the validator.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_document(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(<serde_json::Error as serde::ser::Error>::custom(
                "canonical product did not serialize to an object",
            )),
        }
    }

    /// Returns the number of variants across the default locale.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.as_ref().map_or(0, Vec::len)
    }
}

/// Image URLs keyed by the two sizes the index understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

impl ImageUrls {
    /// Uses one URL for both sizes.
    #[must_use]
    pub fn uniform(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            small: Some(url.clone()),
            medium: Some(url),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.small.is_none() && self.medium.is_none()
    }
}

/// One purchasable variant of a [`CanonicalProduct`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
}

/// A variant option such as `color = Red`. Names are always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

impl VariantAttribute {
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_lowercase(),
            value: value.into(),
        }
    }
}

/// A product feature such as `Material: Leather`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
