//! The `transform` command.
//!
//! Item-level failures are reported in the `errors` array of the output and
//! never change the exit status. Only fatal adapter errors and, with
//! `--validate`, schema violations exit non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use serde_json::Value;

use catsync_adapters::{adapter_for, AdapterSettings, Platform};
use catsync_core::{AppConfig, FieldSchema};
use catsync_validator::validate_batch;

use crate::input::{read_json, resolve_schema, write_json};

#[derive(Debug)]
pub(crate) struct TransformArgs {
    pub platform: Platform,
    pub input: PathBuf,
    pub validate: bool,
    pub schema: Option<PathBuf>,
    pub strict: bool,
    pub pretty: bool,
}

pub(crate) fn run_transform(config: &AppConfig, args: &TransformArgs) -> anyhow::Result<ExitCode> {
    let payload = read_json(&args.input)?;

    let mut settings = AdapterSettings::from_app_config(config);
    if args.strict {
        settings.prestashop_strict = true;
    }

    let schema = if args.validate {
        Some(resolve_schema(config, args.schema.as_deref())?)
    } else {
        None
    };

    let (body, valid) = transform_payload(args.platform, &settings, &payload, schema.as_ref())?;
    write_json(&body, args.pretty)?;

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Runs the adapter and assembles the command output.
///
/// Returns the output document and whether validation (when requested)
/// found no errors.
pub(crate) fn transform_payload(
    platform: Platform,
    settings: &AdapterSettings,
    payload: &Value,
    schema: Option<&FieldSchema>,
) -> anyhow::Result<(Value, bool)> {
    let adapter = adapter_for(platform, settings);
    let output = adapter
        .transform(payload)
        .with_context(|| format!("{platform} payload could not be transformed"))?;

    tracing::info!(
        %platform,
        items = output.item_count(),
        products = output.products.len(),
        dropped = output.errors.len(),
        "transform complete"
    );

    let mut valid = true;
    let validation = match schema {
        Some(schema) => {
            let report = validate_batch(&output.products, schema)?;
            valid = report.is_valid();
            if !valid {
                tracing::warn!(
                    errors = report.errors().count(),
                    "converted products failed validation"
                );
            }
            Some(serde_json::json!({
                "valid": valid,
                "issues": report.issues(),
            }))
        }
        None => None,
    };

    let mut body = serde_json::to_value(&output)?;
    if let (Some(validation), Value::Object(map)) = (validation, &mut body) {
        map.insert("validation".to_owned(), validation);
    }

    Ok((body, valid))
}
