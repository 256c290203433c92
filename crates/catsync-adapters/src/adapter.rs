//! The adapter seam and the per-item runner every adapter shares.

use serde::Deserialize;
use serde_json::Value;

use catsync_core::{AppConfig, CanonicalProduct, ItemError, TransformOutput};

use crate::error::AdapterError;
use crate::magento::MagentoAdapter;
use crate::prestashop::PrestashopAdapter;
use crate::shopify::ShopifyAdapter;
use crate::text::{json_type_name, scalar_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Prestashop,
    Shopify,
    Magento,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Prestashop => write!(f, "prestashop"),
            Platform::Shopify => write!(f, "shopify"),
            Platform::Magento => write!(f, "magento"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prestashop" => Ok(Platform::Prestashop),
            "shopify" => Ok(Platform::Shopify),
            "magento" => Ok(Platform::Magento),
            other => Err(AdapterError::UnknownPlatform(other.to_owned())),
        }
    }
}

/// Converts one platform's raw catalog payload into canonical products.
///
/// Implementations are stateless; `transform` is a pure function of its
/// input and may be called from several threads at once.
pub trait SourceAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// Converts every item of `payload`.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for fatal problems: a missing or mistyped top-level
    /// container, or (PrestaShop strict mode) an item without identity fields.
    /// Everything else is reported per item in [`TransformOutput::errors`].
    fn transform(&self, payload: &Value) -> Result<TransformOutput, AdapterError>;
}

/// Adapter options sourced from [`AppConfig`].
#[derive(Debug, Clone, Default)]
pub struct AdapterSettings {
    pub prestashop_strict: bool,
    pub magento_base_url: Option<String>,
}

impl AdapterSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            prestashop_strict: config.prestashop_strict,
            magento_base_url: config.magento_base_url.clone(),
        }
    }
}

/// Builds the adapter for `platform`.
#[must_use]
pub fn adapter_for(platform: Platform, settings: &AdapterSettings) -> Box<dyn SourceAdapter> {
    match platform {
        Platform::Prestashop => Box::new(PrestashopAdapter::with_strict(settings.prestashop_strict)),
        Platform::Shopify => Box::new(ShopifyAdapter::new()),
        Platform::Magento => Box::new(MagentoAdapter::with_base_url(
            settings.magento_base_url.clone(),
        )),
    }
}

/// Resolves the item list held by a top-level container.
///
/// `null` counts as an empty list; anything other than an array is fatal.
pub(crate) fn item_list<'a>(
    container: &'a Value,
    name: &'static str,
) -> Result<&'a [Value], AdapterError> {
    match container {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(AdapterError::InvalidContainer {
            container: name,
            expected: "an array",
            found: json_type_name(other),
        }),
    }
}

/// Decodes a raw item into a platform input type.
pub(crate) fn decode<'a, T: Deserialize<'a>>(
    item: &'a Value,
    context: &str,
) -> Result<T, AdapterError> {
    T::deserialize(item).map_err(|source| AdapterError::Decode {
        context: context.to_owned(),
        source,
    })
}

/// Reads a required scalar field, reporting its name when absent or blank.
pub(crate) fn required_text(item: &Value, field: &str) -> Result<String, AdapterError> {
    item.get(field)
        .and_then(scalar_text)
        .ok_or_else(|| AdapterError::missing(field))
}

/// Runs `convert` over every item, isolating failures.
///
/// Non-object items are recorded as `invalid_structure` without calling
/// `convert`. Recoverable conversion errors become `transformation_error`
/// entries tagged with the value of `id_field`; fatal ones abort.
pub(crate) fn run_items<'a, I, F>(
    platform: Platform,
    items: I,
    id_field: &str,
    mut convert: F,
) -> Result<TransformOutput, AdapterError>
where
    I: IntoIterator<Item = &'a Value>,
    F: FnMut(usize, &'a Value) -> Result<CanonicalProduct, AdapterError>,
{
    let mut output = TransformOutput::default();

    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            let found = json_type_name(item);
            tracing::warn!(%platform, index, found, "skipping catalog item that is not an object");
            output.errors.push(ItemError::invalid_structure(
                index,
                format!("expected a product object, found {found}"),
            ));
            continue;
        }

        match convert(index, item) {
            Ok(product) => {
                tracing::debug!(%platform, index, id = %product.id, "transformed catalog item");
                output.products.push(product);
            }
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                let product_id = item.get(id_field).and_then(scalar_text);
                tracing::warn!(
                    %platform,
                    index,
                    product_id = product_id.as_deref().unwrap_or("<unknown>"),
                    %error,
                    "dropping catalog item"
                );
                output.errors.push(ItemError::transformation(
                    index,
                    product_id,
                    error.to_string(),
                    Some(error.kind()),
                ));
            }
        }
    }

    tracing::debug!(
        %platform,
        products = output.products.len(),
        errors = output.errors.len(),
        "catalog transform finished"
    );
    Ok(output)
}
