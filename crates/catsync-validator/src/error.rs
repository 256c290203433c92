use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("document failed validation with {} error(s): {}", .errors.len(), .errors.join("; "))]
    Invalid { errors: Vec<String> },

    #[error("failed to serialize product for validation: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ValidationError {
    /// The individual error lines, empty for serialization failures.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationError::Invalid { errors } => errors,
            ValidationError::Serialize(_) => &[],
        }
    }
}
