//! Result shapes shared by every source adapter.

use serde::{Deserialize, Serialize};

use crate::products::CanonicalProduct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemErrorKind {
    /// The item was an object but could not be converted.
    TransformationError,
    /// The item was not an object at all and was skipped untouched.
    InvalidStructure,
}

impl std::fmt::Display for ItemErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemErrorKind::TransformationError => write!(f, "transformation_error"),
            ItemErrorKind::InvalidStructure => write!(f, "invalid_structure"),
        }
    }
}

/// A single source item that did not make it into the output.
///
/// Item errors never abort the surrounding batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    #[serde(rename = "type")]
    pub kind: ItemErrorKind,
    /// Zero-based position of the item in the source list.
    pub product_index: usize,
    /// Source identifier, when one could be read before the failure.
    pub product_id: Option<String>,
    pub message: String,
    /// Name of the underlying error variant, e.g. `"MissingField"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_kind: Option<String>,
}

impl ItemError {
    #[must_use]
    pub fn invalid_structure(product_index: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ItemErrorKind::InvalidStructure,
            product_index,
            product_id: None,
            message: message.into(),
            exception_kind: None,
        }
    }

    #[must_use]
    pub fn transformation(
        product_index: usize,
        product_id: Option<String>,
        message: impl Into<String>,
        exception_kind: Option<&str>,
    ) -> Self {
        Self {
            kind: ItemErrorKind::TransformationError,
            product_index,
            product_id,
            message: message.into(),
            exception_kind: exception_kind.map(str::to_owned),
        }
    }
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at product {}", self.kind, self.product_index)?;
        if let Some(id) = &self.product_id {
            write!(f, " (id {id})")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Output of one adapter `transform` call.
///
/// A non-empty `errors` list alongside fewer `products` than input items
/// means items were dropped; callers must check it even on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub products: Vec<CanonicalProduct>,
    pub errors: Vec<ItemError>,
}

impl TransformOutput {
    /// `true` when every input item produced a product.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of items processed, successful or not.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.products.len() + self.errors.len()
    }
}
