//! Normalization from Shopify product nodes to [`CanonicalProduct`]s.

use serde_json::Value;

use catsync_core::{CanonicalProduct, ImageUrls, ProductVariant, VariantAttribute};

use super::types::{ShopifyImage, ShopifyProduct, ShopifyVariant};
use crate::adapter::{decode, required_text};
use crate::category::from_type_and_tags;
use crate::error::AdapterError;
use crate::text::{decimal_string, shopify_numeric_id, strip_html};

/// Normalizes one raw product node.
///
/// # Errors
///
/// Returns [`AdapterError::MissingField`] when `id` or `title` is absent,
/// [`AdapterError::Decode`] for malformed nested fields and
/// [`AdapterError::InvalidValue`] for unparseable prices.
pub fn normalize_product(raw: &Value) -> Result<CanonicalProduct, AdapterError> {
    let gid = required_text(raw, "id")?;
    required_text(raw, "title")?;

    let source: ShopifyProduct = decode(raw, "shopify product")?;
    let id = shopify_numeric_id(&gid);

    let product_url = non_blank(source.online_store_url.as_deref());
    let hierarchy = from_type_and_tags(source.product_type.as_deref(), &source.tags);
    let (price, base_price) = prices(&source)?;
    let image_url = select_images(source.images.into_vec());
    let description = non_blank(source.description.as_deref()).or_else(|| {
        source
            .description_html
            .as_deref()
            .map(strip_html)
            .filter(|text| !text.is_empty())
    });

    let raw_variants = source.variants.into_vec();
    let in_stock = raw_variants
        .iter()
        .any(|variant| variant.available_for_sale == Some(true));
    let sku = raw_variants
        .iter()
        .find_map(|variant| non_blank(variant.sku.as_deref()))
        .unwrap_or_else(|| id.clone());
    let variants: Vec<ProductVariant> = raw_variants
        .into_iter()
        .map(|variant| normalize_variant(variant, product_url.as_deref()))
        .collect();

    let mut product = CanonicalProduct::new(id, sku);
    product.name = source.title.map(|title| title.trim().to_owned());
    product.brand = non_blank(source.vendor.as_deref());
    product.description = description;
    product.product_url = product_url;
    product.categories = Some(hierarchy.categories);
    product.category_default = Some(hierarchy.default);
    product.price = price;
    product.base_price = base_price;
    product.image_url = image_url;
    product.in_stock = Some(in_stock);
    if !variants.is_empty() {
        product.variants = Some(variants);
    }

    Ok(product)
}

fn normalize_variant(variant: ShopifyVariant, product_url: Option<&str>) -> ProductVariant {
    let id = variant
        .id
        .as_deref()
        .map(shopify_numeric_id)
        .unwrap_or_default();

    let url = product_url
        .filter(|_| !id.is_empty())
        .map(|base| {
            let separator = if base.contains('?') { '&' } else { '?' };
            format!("{base}{separator}variant={id}")
        });

    let attributes = variant
        .selected_options
        .into_iter()
        .filter(|option| !option.name.trim().is_empty())
        .map(|option| VariantAttribute::new(option.name.trim(), option.value))
        .collect();

    ProductVariant {
        id,
        sku: non_blank(variant.sku.as_deref()),
        url,
        attributes,
    }
}

/// Minimum price becomes `price`; maximum becomes `basePrice`, falling back
/// to the minimum.
fn prices(source: &ShopifyProduct) -> Result<(Option<String>, Option<String>), AdapterError> {
    let Some(range) = source.effective_price_range() else {
        return Ok((None, None));
    };

    let min = decimal_string(
        range
            .min_variant_price
            .as_ref()
            .and_then(|money| money.amount.as_ref()),
        "priceRange.minVariantPrice.amount",
    )?;
    let max = decimal_string(
        range
            .max_variant_price
            .as_ref()
            .and_then(|money| money.amount.as_ref()),
        "priceRange.maxVariantPrice.amount",
    )?;

    let base = max.or_else(|| min.clone());
    Ok((min, base))
}

/// Picks `small` (narrowest) and `medium` (middle of the width-sorted list).
///
/// Images without a width sort as zero; ties keep source order.
fn select_images(mut images: Vec<ShopifyImage>) -> Option<ImageUrls> {
    images.retain(|image| image.url.as_deref().is_some_and(|url| !url.trim().is_empty()));
    if images.is_empty() {
        return None;
    }

    images.sort_by_key(|image| image.width.unwrap_or(0));
    let middle = images.len() / 2;

    Some(ImageUrls {
        small: images.first().and_then(|image| image.url.clone()),
        medium: images.get(middle).and_then(|image| image.url.clone()),
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
