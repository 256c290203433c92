//! Type rules for canonical documents.
//!
//! Only fields present in both the schema and the document are checked.
//! Locale-suffixed fields (`name_lt-LT`) follow their base field's rule.

use serde_json::{Map, Value};
use url::Url;

use catsync_core::{split_localized_field_name, CanonicalProduct, FieldConfig, FieldSchema, FieldType};

use crate::error::ValidationError;
use crate::report::ValidationReport;

/// File extensions accepted for `IMAGE_URL` values.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "avif", "bmp", "tif", "tiff",
];

/// Size keys every `IMAGE_URL` value is expected to carry.
const STANDARD_IMAGE_SIZES: [&str; 2] = ["small", "medium"];

/// Validates one canonical document.
#[must_use]
pub fn validate_document(document: &Map<String, Value>, schema: &FieldSchema) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (field, value) in document {
        let Some(config) = field_config(schema, field) else {
            continue;
        };
        validate_value(field, value, config, &mut report);
    }

    tracing::debug!(
        fields = document.len(),
        issues = report.issues().len(),
        "validated document"
    );
    report
}

/// Validates a typed product through its document view.
///
/// # Errors
///
/// Returns [`ValidationError::Serialize`] if the product cannot be rendered
/// as a JSON object.
pub fn validate_product(
    product: &CanonicalProduct,
    schema: &FieldSchema,
) -> Result<ValidationReport, ValidationError> {
    let document = product.to_document()?;
    Ok(validate_document(&document, schema))
}

/// Validates every product independently, prefixing issue paths with
/// `product[<index>]`.
///
/// # Errors
///
/// Returns [`ValidationError::Serialize`] if a product cannot be rendered
/// as a JSON object.
pub fn validate_batch(
    products: &[CanonicalProduct],
    schema: &FieldSchema,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new();
    for (index, product) in products.iter().enumerate() {
        let product_report = validate_product(product, schema)?;
        report.merge_prefixed(&format!("product[{index}]"), product_report);
    }
    Ok(report)
}

/// Validates raw JSON documents, prefixing issue paths with
/// `product[<index>]`. Non-object entries are reported as errors.
#[must_use]
pub fn validate_documents(documents: &[Value], schema: &FieldSchema) -> ValidationReport {
    let mut report = ValidationReport::new();
    for (index, document) in documents.iter().enumerate() {
        let prefix = format!("product[{index}]");
        match document.as_object() {
            Some(object) => report.merge_prefixed(&prefix, validate_document(object, schema)),
            None => report.error(
                prefix,
                format!("expected a document object, found {}", type_name(document)),
            ),
        }
    }
    report
}

fn field_config<'a>(schema: &'a FieldSchema, field: &str) -> Option<&'a FieldConfig> {
    schema.get(field).or_else(|| {
        let (base, _locale) = split_localized_field_name(field)?;
        schema.get(base)
    })
}

fn validate_value(path: &str, value: &Value, config: &FieldConfig, report: &mut ValidationReport) {
    match config.field_type {
        FieldType::Text | FieldType::TextKeyword | FieldType::Keyword => {
            expect_string(path, value, report);
        }
        FieldType::Url => validate_url(path, value, report),
        FieldType::ImageUrl => validate_image_url(path, value, report),
        FieldType::Hierarchy => validate_hierarchy(path, value, report),
        FieldType::Variants => validate_variants(path, value, config, report),
        FieldType::Float | FieldType::Double => validate_number(path, value, report),
        FieldType::Integer => validate_integer(path, value, report),
        FieldType::NameValueList => validate_name_value_list(path, value, report),
    }
}

fn expect_string<'v>(path: &str, value: &'v Value, report: &mut ValidationReport) -> Option<&'v str> {
    let text = value.as_str();
    if text.is_none() {
        report.error(path, format!("expected a string, found {}", type_name(value)));
    }
    text
}

fn is_absolute_url(text: &str) -> Option<Url> {
    Url::parse(text).ok().filter(Url::has_host)
}

fn validate_url(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(text) = expect_string(path, value, report) else {
        return;
    };
    if is_absolute_url(text).is_none() {
        report.error(path, format!("'{text}' is not an absolute URL"));
    }
}

fn validate_image_url(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(sizes) = value.as_object() else {
        report.error(
            path,
            format!("expected an object of image URLs, found {}", type_name(value)),
        );
        return;
    };

    if sizes.is_empty() {
        report.error(
            path,
            format!(
                "image URL object is empty; expected keys: {}",
                STANDARD_IMAGE_SIZES.join(", ")
            ),
        );
        return;
    }

    for size in STANDARD_IMAGE_SIZES {
        if !sizes.contains_key(size) {
            report.warning(path, format!("missing standard size key '{size}'"));
        }
    }

    for (size, url) in sizes {
        let size_path = format!("{path}.{size}");
        let Some(text) = expect_string(&size_path, url, report) else {
            continue;
        };
        let Some(parsed) = is_absolute_url(text) else {
            report.error(&size_path, format!("'{text}' is not an absolute URL"));
            continue;
        };
        if !has_image_extension(&parsed) {
            report.error(
                &size_path,
                format!("'{text}' does not point to a known image type"),
            );
        }
    }
}

/// Checks the URL path only; query strings and fragments are ignored.
fn has_image_extension(url: &Url) -> bool {
    url.path()
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn validate_hierarchy(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(items) = value.as_array() else {
        report.error(path, format!("expected a list of paths, found {}", type_name(value)));
        return;
    };

    let bad: Vec<String> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_string())
        .map(|(index, _)| index.to_string())
        .collect();
    if !bad.is_empty() {
        report.error(
            path,
            format!("items at index {} are not strings", bad.join(", ")),
        );
    }
}

fn validate_variants(path: &str, value: &Value, config: &FieldConfig, report: &mut ValidationReport) {
    let Some(variants) = value.as_array() else {
        report.error(path, format!("expected a list of variants, found {}", type_name(value)));
        return;
    };

    for (index, variant) in variants.iter().enumerate() {
        let variant_path = format!("{path}[{index}]");
        let Some(variant) = variant.as_object() else {
            report.error(
                &variant_path,
                format!("expected a variant object, found {}", type_name(variant)),
            );
            continue;
        };

        let attributes_path = format!("{variant_path}.attributes");
        let Some(attributes) = variant.get("attributes") else {
            report.error(&variant_path, "variant has no attributes");
            continue;
        };
        let Some(attributes) = attribute_map(&attributes_path, attributes, report) else {
            continue;
        };

        let Some(declared) = &config.attributes else {
            continue;
        };
        for (name, attribute_config) in declared {
            if let Some(attribute_value) = find_attribute(&attributes, name) {
                validate_value(
                    &format!("{attributes_path}.{name}"),
                    attribute_value,
                    attribute_config,
                    report,
                );
            }
        }
    }
}

/// Reads variant attributes given as an object or as a `{name, value}` list.
fn attribute_map<'v>(
    path: &str,
    attributes: &'v Value,
    report: &mut ValidationReport,
) -> Option<Vec<(&'v str, &'v Value)>> {
    match attributes {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        Value::Array(pairs) => {
            let mut out = Vec::with_capacity(pairs.len());
            for (index, pair) in pairs.iter().enumerate() {
                match (
                    pair.get("name").and_then(Value::as_str),
                    pair.get("value"),
                ) {
                    (Some(name), Some(value)) => out.push((name, value)),
                    _ => report.error(
                        format!("{path}[{index}]"),
                        "attribute must be an object with a string name and a value",
                    ),
                }
            }
            Some(out)
        }
        other => {
            report.error(
                path,
                format!("expected an attributes object, found {}", type_name(other)),
            );
            None
        }
    }
}

fn find_attribute<'v>(attributes: &[(&'v str, &'v Value)], name: &str) -> Option<&'v Value> {
    attributes
        .iter()
        .find(|(attribute, _)| *attribute == name)
        .map(|(_, value)| *value)
}

fn validate_number(path: &str, value: &Value, report: &mut ValidationReport) {
    let ok = match value {
        Value::Number(_) => true,
        Value::String(text) => text.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    };
    if !ok {
        report.error(path, format!("expected a number, found {}", describe(value)));
    }
}

fn validate_integer(path: &str, value: &Value, report: &mut ValidationReport) {
    let ok = match value {
        Value::Number(number) => number.is_i64() || number.is_u64(),
        Value::String(text) => text.trim().parse::<i64>().is_ok(),
        _ => false,
    };
    if !ok {
        report.error(path, format!("expected an integer, found {}", describe(value)));
    }
}

fn validate_name_value_list(path: &str, value: &Value, report: &mut ValidationReport) {
    let Some(items) = value.as_array() else {
        report.error(
            path,
            format!("expected a list of name/value pairs, found {}", type_name(value)),
        );
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let well_formed = item.get("name").is_some_and(Value::is_string)
            && item.get("value").is_some_and(Value::is_string);
        if !well_formed {
            report.error(
                format!("{path}[{index}]"),
                "expected an object with string name and value",
            );
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type name, plus the text itself for strings.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => format!("string '{text}'"),
        other => type_name(other).to_owned(),
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
