//! Normalization from Magento product items to [`CanonicalProduct`]s.

use serde_json::{Map, Value};
use url::Url;

use catsync_core::products::CANONICAL_FIELDS;
use catsync_core::{CanonicalProduct, ImageUrls, ProductVariant, VariantAttribute};

use super::types::{ComplexText, ConfigurableVariant, MagentoCategory, MagentoProduct, Money};
use crate::adapter::{decode, required_text};
use crate::category::{from_flat_list, CategoryIndex, FlatCategory};
use crate::error::AdapterError;
use crate::text::{as_flag, decimal_string, strip_html};

const REQUIRED_FIELDS: [&str; 3] = ["id", "sku", "name"];

const MANUFACTURER_CODE: &str = "manufacturer";

/// Converts one raw `items` entry.
///
/// Every source field that is not a canonical field is carried over as-is.
///
/// # Errors
///
/// Returns [`AdapterError::MissingField`] when `id`, `sku` or `name` is
/// absent, [`AdapterError::Decode`] for malformed modeled fields and
/// [`AdapterError::InvalidValue`] for unparseable prices.
pub fn normalize_product(
    raw: &Value,
    categories: &CategoryIndex,
    base_url: Option<&Url>,
) -> Result<CanonicalProduct, AdapterError> {
    for field in REQUIRED_FIELDS {
        required_text(raw, field)?;
    }

    let source: MagentoProduct = decode(raw, "magento product")?;
    let (Some(id), Some(sku)) = (source.id.clone(), source.sku.clone()) else {
        return Err(AdapterError::missing("id"));
    };

    let mut product = CanonicalProduct::new(id, sku);
    product.extra = pass_through(raw);

    product.name = source.name.as_deref().map(str::trim).map(str::to_owned);
    product.description = html_text(source.description.as_ref());
    product.description_short = html_text(source.short_description.as_ref());
    product.brand = source
        .all_custom_attributes()
        .filter(|attribute| attribute.code.as_deref() == Some(MANUFACTURER_CODE))
        .find_map(|attribute| attribute.display_value());

    if let Some(prices) = source
        .price_range
        .as_ref()
        .and_then(|range| range.minimum_price.as_ref())
    {
        let final_price = Money::amount(prices.final_price.as_ref());
        let regular_price = Money::amount(prices.regular_price.as_ref());
        let final_excl = Money::amount(prices.final_price_excl_tax.as_ref()).or(final_price);
        let regular_excl = Money::amount(prices.regular_price_excl_tax.as_ref()).or(regular_price);

        product.price = decimal_string(final_price, "price_range.minimum_price.final_price")?;
        product.base_price = decimal_string(regular_price, "price_range.minimum_price.regular_price")?;
        product.price_tax_excluded =
            decimal_string(final_excl, "price_range.minimum_price.final_price_excl_tax")?;
        product.base_price_tax_excluded =
            decimal_string(regular_excl, "price_range.minimum_price.regular_price_excl_tax")?;
    }

    product.in_stock = source
        .is_in_stock
        .as_ref()
        .and_then(as_flag)
        .or_else(|| {
            source
                .stock_status
                .as_deref()
                .map(|status| status.eq_ignore_ascii_case("IN_STOCK"))
        });

    product.image_url = source.primary_image_url().map(ImageUrls::uniform);
    product.product_url = product_url(&source, base_url);

    let flat: Vec<FlatCategory> = source
        .categories
        .into_iter()
        .filter_map(MagentoCategory::into_flat)
        .collect();
    if !flat.is_empty() {
        let hierarchy = from_flat_list(&flat, categories);
        product.categories = Some(hierarchy.categories);
        product.category_default = Some(hierarchy.default).filter(|name| !name.is_empty());
    }

    let variants: Vec<ProductVariant> = source
        .variants
        .into_iter()
        .enumerate()
        .filter_map(|(position, variant)| normalize_variant(&product.id, position, variant))
        .collect();
    if !variants.is_empty() {
        product.variants = Some(variants);
    }

    Ok(product)
}

/// Source fields with no canonical counterpart.
fn pass_through(raw: &Value) -> Map<String, Value> {
    raw.as_object()
        .map(|object| {
            object
                .iter()
                .filter(|(key, _)| !CANONICAL_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default()
}

fn html_text(text: Option<&ComplexText>) -> Option<String> {
    text.and_then(|t| t.html.as_deref())
        .map(strip_html)
        .filter(|stripped| !stripped.is_empty())
}

/// `canonical_url` when absolute; otherwise resolved against the configured
/// storefront base, preferring `url_key` + `url_suffix`.
fn product_url(source: &MagentoProduct, base_url: Option<&Url>) -> Option<String> {
    let canonical = source
        .canonical_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    if let Some(absolute) = canonical.filter(|url| Url::parse(url).is_ok()) {
        return Some(absolute.to_owned());
    }

    let base = base_url?;
    let relative = match source.url_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => {
            format!("{key}{}", source.url_suffix.as_deref().unwrap_or_default())
        }
        _ => canonical?.trim_start_matches('/').to_owned(),
    };
    base.join(&relative).ok().map(|url| url.to_string())
}

fn normalize_variant(
    product_id: &str,
    position: usize,
    variant: ConfigurableVariant,
) -> Option<ProductVariant> {
    let Some(child) = variant.product.filter(|child| child.id.is_some()) else {
        tracing::warn!(product_id, position, "skipping configurable variant without product id");
        return None;
    };

    let attributes = variant
        .attributes
        .into_iter()
        .filter_map(|option| match (option.code, option.label) {
            (Some(code), Some(label)) if !code.trim().is_empty() => {
                Some(VariantAttribute::new(code.trim(), label))
            }
            _ => None,
        })
        .collect();

    Some(ProductVariant {
        id: child.id.unwrap_or_default(),
        sku: child.sku,
        url: None,
        attributes,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
