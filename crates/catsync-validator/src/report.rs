use serde::Serialize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    /// Reported but does not make a document invalid.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One rule violation at a document path such as `variants[0].attributes.color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "{}: {}", self.path, self.message),
            Severity::Warning => write!(f, "{}: {} (warning)", self.path, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(path.into(), message.into(), Severity::Error);
    }

    pub fn warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.push(path.into(), message.into(), Severity::Warning);
    }

    fn push(&mut self, path: String, message: String, severity: Severity) {
        self.issues.push(ValidationIssue {
            path,
            message,
            severity,
        });
    }

    /// `true` when no error-severity issue was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Appends `other`'s issues with every path prefixed by `prefix`.
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationReport) {
        self.issues
            .extend(other.issues.into_iter().map(|mut issue| {
                issue.path = format!("{prefix}.{}", issue.path);
                issue
            }));
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Converts to `Err` when any error-severity issue exists. Warnings
    /// alone leave the report intact in `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Invalid`] listing every error line.
    pub fn into_result(self) -> Result<Self, ValidationError> {
        if self.is_valid() {
            return Ok(self);
        }
        Err(ValidationError::Invalid {
            errors: self.errors().map(ToString::to_string).collect(),
        })
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_do_not_invalidate() {
        let mut report = ValidationReport::new();
        report.warning("imageUrl", "missing standard size key 'medium'");
        assert!(report.is_valid());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn into_result_lists_only_errors() {
        let mut report = ValidationReport::new();
        report.warning("imageUrl", "missing standard size key 'medium'");
        report.error("name", "expected a string, found number");

        let err = report.into_result().unwrap_err();
        assert_eq!(err.errors(), ["name: expected a string, found number"]);
    }

    #[test]
    fn merge_prefixed_rewrites_paths() {
        let mut inner = ValidationReport::new();
        inner.error("sku", "expected a string, found null");
        let mut outer = ValidationReport::new();
        outer.merge_prefixed("product[2]", inner);
        assert_eq!(outer.issues()[0].path, "product[2].sku");
    }

    #[test]
    fn display_marks_warnings() {
        let mut report = ValidationReport::new();
        report.warning("imageUrl", "missing standard size key 'small'");
        assert_eq!(
            report.to_string(),
            "imageUrl: missing standard size key 'small' (warning)\n"
        );
    }
}
