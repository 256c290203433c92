//! Locale expansion policy shared by every source adapter.
//!
//! Source platforms deliver translatable fields as a `{locale -> value}` map.
//! The value for [`DEFAULT_LOCALE`] lands in the un-suffixed canonical field
//! (`name`); every other locale lands in a suffixed sibling (`name_lt-LT`).
//!
//! There is no implicit fallback: when the default locale is missing, no
//! un-suffixed field is produced. Callers that want first-available
//! semantics ask for it through [`Localized::get_or_first`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// The locale whose fields carry no suffix.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Matches `base_<locale>` field names such as `name_lt-LT` or `categories_de`.
static LOCALIZED_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)_([a-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*)$").expect("valid locale regex")
});

/// Returns the canonical field name for `base` in `locale`.
#[must_use]
pub fn localized_field_name(base: &str, locale: &str) -> String {
    if locale == DEFAULT_LOCALE {
        base.to_owned()
    } else {
        format!("{base}_{locale}")
    }
}

/// Splits a locale-suffixed field name into `(base, locale)`.
///
/// Returns `None` for names that carry no locale suffix.
#[must_use]
pub fn split_localized_field_name(field: &str) -> Option<(&str, &str)> {
    let caps = LOCALIZED_FIELD_RE.captures(field)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Returns the usable `(locale, value)` pairs of a raw locale map.
///
/// Skipped silently:
/// - containers that are not JSON objects (list-shaped maps have no locale keys)
/// - purely numeric keys, which is how list indexes leak into object form
/// - null and empty values
///
/// Structured values of the form `{"value": ...}` are unwrapped.
#[must_use]
pub fn localized_entries(raw: &Value) -> Vec<(&str, &Value)> {
    let Some(map) = raw.as_object() else {
        return Vec::new();
    };

    map.iter()
        .filter(|(locale, _)| is_locale_key(locale))
        .filter_map(|(locale, value)| unwrap_value(value).map(|v| (locale.as_str(), v)))
        .collect()
}

/// Applies the expansion policy to a raw locale map, producing canonical
/// `(field name, value)` pairs.
#[must_use]
pub fn expand_locales(base: &str, raw: &Value) -> Vec<(String, Value)> {
    localized_entries(raw)
        .into_iter()
        .map(|(locale, value)| (localized_field_name(base, locale), value.clone()))
        .collect()
}

/// `true` for values the policy treats as absent.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn is_locale_key(key: &str) -> bool {
    !key.is_empty() && !key.bytes().all(|b| b.is_ascii_digit())
}

fn unwrap_value(value: &Value) -> Option<&Value> {
    let inner = match value {
        Value::Object(map) => map.get("value").unwrap_or(value),
        other => other,
    };
    (!is_blank(inner)).then_some(inner)
}

/// Renders a scalar JSON value as text. Arrays and objects yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// An ordered `locale -> value` collection.
///
/// Keeps insertion order so that per-locale outputs (variants, category
/// paths) come out in the order the source presented them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Localized<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Localized<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `locale`.
    pub fn insert(&mut self, locale: impl Into<String>, value: T) {
        let locale = locale.into();
        match self.entries.iter_mut().find(|(l, _)| *l == locale) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((locale, value)),
        }
    }

    /// Returns the value for `locale`, inserting `make()` first if absent.
    pub fn get_or_insert_with(&mut self, locale: &str, make: impl FnOnce() -> T) -> &mut T {
        let idx = match self.entries.iter().position(|(l, _)| l == locale) {
            Some(idx) => idx,
            None => {
                self.entries.push((locale.to_owned(), make()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, v)| v)
    }

    /// Exact-locale lookup with first-available fallback.
    #[must_use]
    pub fn get_or_first(&self, locale: &str) -> Option<&T> {
        self.get(locale).or_else(|| self.first())
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a collection from a raw locale map, keeping only values `convert`
    /// accepts.
    pub fn from_value_with(raw: &Value, mut convert: impl FnMut(&Value) -> Option<T>) -> Self {
        let mut out = Self::new();
        for (locale, value) in localized_entries(raw) {
            if let Some(converted) = convert(value) {
                out.insert(locale, converted);
            }
        }
        out
    }
}

impl Localized<String> {
    /// Builds a text collection from a raw locale map. Scalar values are
    /// rendered as text; nested structures are skipped.
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        Self::from_value_with(raw, scalar_text)
    }
}

impl<T> IntoIterator for Localized<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T> FromIterator<(String, T)> for Localized<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (locale, value) in iter {
            out.insert(locale, value);
        }
        out
    }
}
