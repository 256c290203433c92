use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("payload is missing the `{expected}` container")]
    MissingContainer { expected: &'static str },

    #[error("`{container}` must be {expected}, found {found}")]
    InvalidContainer {
        container: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("product {index} is missing required field `{field}`")]
    MissingRequiredField { index: usize, field: &'static str },

    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode canonical field: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("unknown source platform \"{0}\"")]
    UnknownPlatform(String),
}

impl AdapterError {
    /// Fatal errors abort the whole `transform` call; the rest are recorded
    /// against a single item.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AdapterError::MissingContainer { .. }
                | AdapterError::InvalidContainer { .. }
                | AdapterError::MissingRequiredField { .. }
                | AdapterError::UnknownPlatform(_)
        )
    }

    /// Variant name, reported as `exception_kind` on item errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::MissingContainer { .. } => "MissingContainer",
            AdapterError::InvalidContainer { .. } => "InvalidContainer",
            AdapterError::MissingRequiredField { .. } => "MissingRequiredField",
            AdapterError::MissingField { .. } => "MissingField",
            AdapterError::InvalidValue { .. } => "InvalidValue",
            AdapterError::Decode { .. } => "Decode",
            AdapterError::Encode(_) => "Encode",
            AdapterError::UnknownPlatform(_) => "UnknownPlatform",
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        AdapterError::MissingField {
            field: field.into(),
        }
    }
}
