//! Shopify Storefront/Admin GraphQL product shapes.
//!
//! ## Observed shape
//!
//! ### Connections
//! List fields (`images`, `variants`) arrive either as plain arrays or as
//! GraphQL connections: `{"edges": [{"node": {...}}]}` or `{"nodes": [...]}`.
//! [`Connection`] accepts all three, plus `null`.
//!
//! ### `id`
//! A global id such as `gid://shopify/Product/6843600694995`. Older REST
//! exports send the bare number. Both are reduced to the trailing digits
//! during normalization.
//!
//! ### Tags
//! A JSON array of strings from GraphQL; a comma-separated string from the
//! legacy REST/Liquid surfaces.
//!
//! ### Prices
//! `priceRangeV2` on the Admin API, `priceRange` on the Storefront API. The
//! `amount` is a decimal string (`"30.0"`) but some proxies re-encode it as a
//! number.
//!
//! ### Images
//! `url` on current API versions, `src` / `originalSrc` on older ones.
//! `width` may be absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::text::deserialize_scalar;

/// A single product node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyProduct {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub handle: Option<String>,

    /// Brand name as configured in Shopify.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Plain-text description. Preferred over `descriptionHtml` when present.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub description_html: Option<String>,

    /// `null` for products not published to the online store.
    #[serde(default)]
    pub online_store_url: Option<String>,

    /// May be empty (`""`); treated as absent.
    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    #[serde(default)]
    pub price_range_v2: Option<PriceRange>,

    #[serde(default)]
    pub price_range: Option<PriceRange>,

    #[serde(default)]
    pub images: Connection<ShopifyImage>,

    #[serde(default)]
    pub variants: Connection<ShopifyVariant>,
}

impl ShopifyProduct {
    /// The Admin price range when present, else the Storefront one.
    #[must_use]
    pub fn effective_price_range(&self) -> Option<&PriceRange> {
        self.price_range_v2.as_ref().or(self.price_range.as_ref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    #[serde(default)]
    pub min_variant_price: Option<Money>,
    #[serde(default)]
    pub max_variant_price: Option<Money>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal string or number.
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyImage {
    #[serde(default, alias = "src", alias = "originalSrc")]
    pub url: Option<String>,
    /// Pixel width.
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub height: Option<u64>,
}

/// A purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyVariant {
    #[serde(default, deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,

    /// Present but may be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,

    #[serde(default)]
    pub available_for_sale: Option<bool>,

    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// A variant option such as `Color: Red`.
#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// A GraphQL list field in any of its encodings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Connection<T> {
    List(Vec<T>),
    Edges { edges: Vec<Edge<T>> },
    Nodes { nodes: Vec<T> },
    Empty,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Connection::Empty
    }
}

impl<T> Connection<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Connection::List(items) | Connection::Nodes { nodes: items } => items,
            Connection::Edges { edges } => edges.into_iter().map(|edge| edge.node).collect(),
            Connection::Empty => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    List(Vec<String>),
    Joined(String),
}

/// Accepts tags as an array of strings or a comma-separated string.
/// Blank tags are dropped.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<RawTags>::deserialize(deserializer)? {
        Some(RawTags::List(tags)) => tags,
        Some(RawTags::Joined(joined)) => joined.split(',').map(str::to_owned).collect(),
        None => Vec::new(),
    };
    Ok(tags
        .into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect())
}
