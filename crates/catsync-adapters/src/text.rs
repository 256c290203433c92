//! Small value-level helpers shared by the adapters: HTML stripping, price
//! normalization, identifier coercion.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::AdapterError;

/// Strip HTML tags from a string, decode the common entities and normalize
/// whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                // Tags separate words: "<p>a</p><p>b</p>" reads "a b".
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    let decoded = decode_entities(&out);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Renders a scalar identifier (string or number) as text.
///
/// Returns `None` for null, blank strings, and structured values.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a loosely typed boolean: JSON bool, `0`/`1`, or `"true"`/`"false"`.
#[must_use]
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Normalizes a price given as a JSON number or numeric string into a
/// canonical decimal string (`"12.50"` and `12.5` both become `"12.5"`).
///
/// # Errors
///
/// Returns [`AdapterError::InvalidValue`] when the value is present but not
/// a decimal number.
pub fn decimal_string(value: Option<&Value>, field: &str) -> Result<Option<String>, AdapterError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(AdapterError::InvalidValue {
                field: field.to_owned(),
                reason: format!("expected a decimal, found {}", json_type_name(other)),
            })
        }
    };

    let parsed = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| AdapterError::InvalidValue {
            field: field.to_owned(),
            reason: format!("\"{text}\" is not a decimal: {e}"),
        })?;
    Ok(Some(parsed.normalize().to_string()))
}

/// Reduces a Shopify global id (`gid://shopify/Product/123`) to its trailing
/// numeric segment.
///
/// Ids that do not end in digits yield an empty string.
#[must_use]
pub fn shopify_numeric_id(gid: &str) -> String {
    let tail = gid.trim().rsplit('/').next().unwrap_or_default();
    if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
        tail.to_owned()
    } else {
        String::new()
    }
}

/// Deserializes an identifier given as a JSON string or number into text.
///
/// Null, blank strings and structured values become `None`.
pub(crate) fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Short JSON type name for diagnostics.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strip_html_removes_tags_and_collapses_whitespace() {
        assert_eq!(
            strip_html("<p>Great   <b>leather</b> shoe.</p>\n<p>Second</p>"),
            "Great leather shoe. Second"
        );
    }

    #[test]
    fn strip_html_decodes_entities() {
        assert_eq!(strip_html("Salt &amp; Pepper&nbsp;&lt;3"), "Salt & Pepper <3");
    }

    #[test]
    fn strip_html_plain_text_unchanged() {
        assert_eq!(strip_html("plain text"), "plain text");
    }

    #[test]
    fn decimal_string_normalizes_numbers_and_strings() {
        assert_eq!(
            decimal_string(Some(&json!("12.99")), "price").unwrap().as_deref(),
            Some("12.99")
        );
        assert_eq!(
            decimal_string(Some(&json!(42.0)), "price").unwrap().as_deref(),
            Some("42")
        );
        assert_eq!(
            decimal_string(Some(&json!("12.50")), "price").unwrap().as_deref(),
            Some("12.5")
        );
        assert_eq!(
            decimal_string(Some(&json!(7)), "price").unwrap().as_deref(),
            Some("7")
        );
    }

    #[test]
    fn decimal_string_absent_values_are_none() {
        assert!(decimal_string(None, "price").unwrap().is_none());
        assert!(decimal_string(Some(&Value::Null), "price").unwrap().is_none());
        assert!(decimal_string(Some(&json!("  ")), "price").unwrap().is_none());
    }

    #[test]
    fn decimal_string_rejects_garbage() {
        let err = decimal_string(Some(&json!("twelve")), "basePrice").unwrap_err();
        assert!(
            matches!(err, AdapterError::InvalidValue { ref field, .. } if field == "basePrice")
        );
        assert!(decimal_string(Some(&json!([1])), "price").is_err());
    }

    #[test]
    fn shopify_numeric_id_extracts_trailing_digits() {
        assert_eq!(
            shopify_numeric_id("gid://shopify/Product/6843600694995"),
            "6843600694995"
        );
        assert_eq!(shopify_numeric_id("gid://shopify/ProductVariant/42"), "42");
        assert_eq!(shopify_numeric_id("123"), "123");
    }

    #[test]
    fn shopify_numeric_id_malformed_is_empty() {
        assert_eq!(shopify_numeric_id("gid://shopify/Product/abc"), "");
        assert_eq!(shopify_numeric_id("gid://shopify/Product/"), "");
        assert_eq!(shopify_numeric_id(""), "");
    }

    #[test]
    fn as_flag_reads_loose_booleans() {
        assert_eq!(as_flag(&json!(true)), Some(true));
        assert_eq!(as_flag(&json!(0)), Some(false));
        assert_eq!(as_flag(&json!("1")), Some(true));
        assert_eq!(as_flag(&json!("maybe")), None);
    }

    #[test]
    fn scalar_text_accepts_strings_and_numbers() {
        assert_eq!(scalar_text(&json!(12)).as_deref(), Some("12"));
        assert_eq!(scalar_text(&json!("A-1")).as_deref(), Some("A-1"));
        assert_eq!(scalar_text(&json!(" ")), None);
        assert_eq!(scalar_text(&json!({"id": 1})), None);
    }
}
