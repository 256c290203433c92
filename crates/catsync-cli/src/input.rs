//! Reading payloads, resolving the field schema, and writing results.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use catsync_core::{load_schema, AppConfig, FieldSchema};

/// Reads and parses a JSON file. A path of `-` reads stdin.
pub(crate) fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Picks the schema from `--schema`, then `CATSYNC_SCHEMA_PATH`, then the
/// built-in catalog schema.
pub(crate) fn resolve_schema(
    config: &AppConfig,
    override_path: Option<&Path>,
) -> anyhow::Result<FieldSchema> {
    match override_path.or(config.schema_path.as_deref()) {
        Some(path) => {
            let schema = load_schema(path)
                .with_context(|| format!("failed to load schema {}", path.display()))?;
            tracing::debug!(path = %path.display(), fields = schema.len(), "loaded field schema");
            Ok(schema)
        }
        None => Ok(FieldSchema::catalog_default()),
    }
}

pub(crate) fn write_json(value: &Value, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
