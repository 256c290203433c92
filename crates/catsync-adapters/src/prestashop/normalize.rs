//! Conversion from PrestaShop export items to [`CanonicalProduct`]s.

use serde_json::Value;

use catsync_core::{
    CanonicalProduct, ImageUrls, Localized, NameValue, ProductVariant, VariantAttribute,
    DEFAULT_LOCALE,
};

use super::types::{PrestashopCategory, PrestashopFeature, PrestashopProduct, PrestashopVariant};
use crate::adapter::decode;
use crate::category::{from_leveled_buckets, LocalizedHierarchy};
use crate::error::AdapterError;
use crate::text::{as_flag, decimal_string, scalar_text};

/// Identity fields every product must carry.
const REQUIRED_FIELDS: [&str; 2] = ["remoteId", "sku"];

/// Converts one raw `data.products` item.
///
/// # Errors
///
/// A missing `remoteId` or `sku` yields [`AdapterError::MissingRequiredField`]
/// in strict mode and [`AdapterError::MissingField`] otherwise. Malformed
/// fields yield [`AdapterError::Decode`] or [`AdapterError::InvalidValue`].
pub fn normalize_product(
    index: usize,
    raw: &Value,
    strict: bool,
) -> Result<CanonicalProduct, AdapterError> {
    for field in REQUIRED_FIELDS {
        if raw.get(field).and_then(scalar_text).is_none() {
            return Err(if strict {
                AdapterError::MissingRequiredField { index, field }
            } else {
                AdapterError::missing(field)
            });
        }
    }

    let source: PrestashopProduct = decode(raw, "prestashop product")?;
    let id = source
        .remote_id
        .ok_or_else(|| AdapterError::missing("remoteId"))?;
    let sku = source.sku.ok_or_else(|| AdapterError::missing("sku"))?;

    let mut product = CanonicalProduct::new(id, sku);

    product.name = product.extend_localized("name", Localized::from_value(&source.localized_names))?;
    if let Some(brand) = &source.brand {
        product.brand =
            product.extend_localized("brand", Localized::from_value(&brand.localized_names))?;
    }
    product.description = product.extend_localized(
        "description",
        Localized::from_value(&source.localized_descriptions),
    )?;
    product.description_short = product.extend_localized(
        "descriptionShort",
        Localized::from_value(&source.localized_short_descriptions),
    )?;
    product.product_url =
        product.extend_localized("productUrl", Localized::from_value(&source.localized_links))?;

    let hierarchy = category_hierarchy(source.categories.into_levels());
    product.categories = product.extend_localized("categories", hierarchy.categories)?;
    product.category_default = product.extend_localized("categoryDefault", hierarchy.default)?;

    if let Some(images) = source.image_urls {
        let urls = ImageUrls {
            small: images.small.filter(|u| !u.trim().is_empty()),
            medium: images.medium.filter(|u| !u.trim().is_empty()),
        };
        if !urls.is_empty() {
            product.image_url = Some(urls);
        }
    }

    product.price = decimal_string(source.price.as_ref(), "price")?;
    product.base_price = decimal_string(source.base_price.as_ref(), "basePrice")?;
    product.price_tax_excluded =
        decimal_string(source.price_tax_excluded.as_ref(), "priceTaxExcluded")?;
    product.base_price_tax_excluded =
        decimal_string(source.base_price_tax_excluded.as_ref(), "basePriceTaxExcluded")?;
    product.in_stock = source.in_stock.as_ref().and_then(as_flag);

    product.features = product.extend_localized("features", localized_features(&source.features))?;

    let variants = localized_variants(&source.variants)?;
    product.variants = product.extend_localized("variants", variants)?;

    Ok(product)
}

fn category_hierarchy(levels: Vec<Vec<PrestashopCategory>>) -> LocalizedHierarchy {
    let buckets: Vec<Vec<Localized<String>>> = levels
        .into_iter()
        .map(|level| {
            level
                .iter()
                .map(|entry| Localized::from_value(&entry.localized_paths))
                .collect()
        })
        .collect();
    from_leveled_buckets(&buckets)
}

/// A translated `{name, value}` pair with its locale maps parsed once.
struct LocalizedPair {
    names: Localized<String>,
    values: Localized<String>,
}

impl LocalizedPair {
    fn parse(raw: &PrestashopFeature) -> Self {
        Self {
            names: Localized::from_value(&raw.localized_names),
            values: Localized::from_value(&raw.localized_values),
        }
    }

    /// Resolves the pair for `locale`, falling back to the first available
    /// translation on either side.
    fn resolve(&self, locale: &str) -> Option<(&str, &str)> {
        let name = self.names.get_or_first(locale)?;
        let value = self.values.get_or_first(locale)?;
        Some((name.as_str(), value.as_str()))
    }

    fn locales(&self) -> impl Iterator<Item = &str> {
        self.names.locales().chain(self.values.locales())
    }
}

/// Pushes `locale` onto `seen` unless already present.
fn note_locale(seen: &mut Vec<String>, locale: &str) {
    if !seen.iter().any(|l| l == locale) {
        seen.push(locale.to_owned());
    }
}

fn localized_features(features: &[PrestashopFeature]) -> Localized<Vec<NameValue>> {
    let pairs: Vec<LocalizedPair> = features.iter().map(LocalizedPair::parse).collect();

    let mut locales = Vec::new();
    for pair in &pairs {
        for locale in pair.locales() {
            note_locale(&mut locales, locale);
        }
    }

    locales
        .into_iter()
        .map(|locale| {
            let resolved: Vec<NameValue> = pairs
                .iter()
                .filter_map(|pair| pair.resolve(&locale))
                .map(|(name, value)| NameValue::new(name, value))
                .collect();
            (locale, resolved)
        })
        .collect()
}

/// Expands every variant into one entry per locale it is discoverable in.
///
/// A variant with no translated links or attributes is emitted once, under
/// the default locale.
fn localized_variants(
    variants: &[PrestashopVariant],
) -> Result<Localized<Vec<ProductVariant>>, AdapterError> {
    let mut out: Localized<Vec<ProductVariant>> = Localized::new();

    for (position, variant) in variants.iter().enumerate() {
        let Some(id) = variant.remote_id.as_deref() else {
            return Err(AdapterError::missing(format!(
                "variants[{position}].remoteId"
            )));
        };

        let links = Localized::from_value(&variant.localized_links);
        let attributes: Vec<LocalizedPair> =
            variant.attributes.iter().map(LocalizedPair::parse).collect();

        let mut locales = Vec::new();
        for locale in links.locales() {
            note_locale(&mut locales, locale);
        }
        for attribute in &attributes {
            for locale in attribute.locales() {
                note_locale(&mut locales, locale);
            }
        }
        if locales.is_empty() {
            tracing::debug!(variant = id, "variant has no translations; using default locale");
            locales.push(DEFAULT_LOCALE.to_owned());
        }

        for locale in locales {
            let entry = ProductVariant {
                id: id.to_owned(),
                sku: variant.sku.clone(),
                url: links.get(&locale).cloned(),
                attributes: attributes
                    .iter()
                    .filter_map(|attribute| attribute.resolve(&locale))
                    .map(|(name, value)| VariantAttribute::new(name, value))
                    .collect(),
            };
            out.get_or_insert_with(&locale, Vec::new).push(entry);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
