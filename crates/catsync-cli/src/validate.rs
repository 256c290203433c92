//! The `validate` command: checks canonical documents produced elsewhere.

use std::path::Path;
use std::process::ExitCode;

use serde_json::Value;

use catsync_core::{AppConfig, FieldSchema};
use catsync_validator::{validate_documents, ValidationReport};

use crate::input::{read_json, resolve_schema};

pub(crate) fn run_validate(
    config: &AppConfig,
    input: &Path,
    schema: Option<&Path>,
) -> anyhow::Result<ExitCode> {
    let schema = resolve_schema(config, schema)?;
    let payload = read_json(input)?;
    let report = validate_payload(payload, &schema);

    print!("{report}");
    let errors = report.errors().count();
    let warnings = report.warnings().count();
    println!("{errors} error(s), {warnings} warning(s)");

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// A single object is validated as a one-document batch.
pub(crate) fn validate_payload(payload: Value, schema: &FieldSchema) -> ValidationReport {
    let documents = match payload {
        Value::Array(documents) => documents,
        other => vec![other],
    };
    validate_documents(&documents, schema)
}
