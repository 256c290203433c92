//! Schema-driven validation of canonical catalog documents.
//!
//! Validation is read-only and never short-circuits: every rule violation in
//! every field (and every product of a batch) is collected into one
//! [`ValidationReport`].

pub mod error;
pub mod report;
pub mod validator;

pub use error::ValidationError;
pub use report::{Severity, ValidationIssue, ValidationReport};
pub use validator::{
    validate_batch, validate_document, validate_documents, validate_product, IMAGE_EXTENSIONS,
};
