//! Declarative field schema describing a canonical document's shape.
//!
//! The same structure is sent to the remote indexing service (as JSON) and
//! drives the local validator. Deployments keep it in `config/schema.yaml`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    TextKeyword,
    Keyword,
    Hierarchy,
    Variants,
    ImageUrl,
    Url,
    Float,
    Integer,
    Double,
    NameValueList,
}

impl FieldType {
    /// Wire name, e.g. `"TEXT_KEYWORD"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::TextKeyword => "TEXT_KEYWORD",
            FieldType::Keyword => "KEYWORD",
            FieldType::Hierarchy => "HIERARCHY",
            FieldType::Variants => "VARIANTS",
            FieldType::ImageUrl => "IMAGE_URL",
            FieldType::Url => "URL",
            FieldType::Float => "FLOAT",
            FieldType::Integer => "INTEGER",
            FieldType::Double => "DOUBLE",
            FieldType::NameValueList => "NAME_VALUE_LIST",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Nested fields of a structured value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, FieldConfig>>,
    /// Variant attribute names and their types. Only meaningful for `VARIANTS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, FieldConfig>>,
    /// Free-form secondary configuration (tokenizers, analyzers) passed
    /// through to the indexing service untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfields: Option<Value>,
    /// Flags the field for downstream vector-embedding generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeddable: Option<bool>,
}

impl FieldConfig {
    #[must_use]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            properties: None,
            attributes: None,
            subfields: None,
            embeddable: None,
        }
    }

    #[must_use]
    pub fn with_properties<I, K>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldConfig)>,
        K: Into<String>,
    {
        self.properties = Some(properties.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    #[must_use]
    pub fn with_attributes<I, K>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldConfig)>,
        K: Into<String>,
    {
        self.attributes = Some(attributes.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    #[must_use]
    pub fn with_subfields(mut self, subfields: Value) -> Self {
        self.subfields = Some(subfields);
        self
    }

    #[must_use]
    pub fn embeddable(mut self) -> Self {
        self.embeddable = Some(true);
        self
    }

    #[must_use]
    pub fn is_embeddable(&self) -> bool {
        self.embeddable.unwrap_or(false)
    }
}

/// The full `field name -> FieldConfig` map for one deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema {
    fields: BTreeMap<String, FieldConfig>,
}

impl FieldSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, builder style.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, config: FieldConfig) -> Self {
        self.insert(name, config);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, config: FieldConfig) {
        self.fields.insert(name.into(), config);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of top-level fields flagged for embedding generation.
    #[must_use]
    pub fn embeddable_fields(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, cfg)| cfg.is_embeddable())
            .map(|(name, _)| name)
            .collect()
    }

    /// Parses and structurally validates a JSON schema description.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid JSON for a schema or
    /// fails validation.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let schema: Self = serde_json::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parses and structurally validates a YAML schema description.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid YAML for a schema or
    /// fails validation.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let schema: Self = serde_yaml::from_str(text)?;
        schema.validate()?;
        Ok(schema)
    }

    /// The JSON object describing this schema to the indexing service.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Structural checks applied to schemas loaded from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for empty field names or a
    /// `VARIANTS` field without an `attributes` map, anywhere in the tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_fields(&self.fields, "")
    }

    /// The built-in schema covering every canonical product field.
    #[must_use]
    pub fn catalog_default() -> Self {
        let keyword = || FieldConfig::new(FieldType::Keyword);
        let float = || FieldConfig::new(FieldType::Float);

        Self::new()
            .with_field("id", keyword())
            .with_field("sku", keyword())
            .with_field("name", FieldConfig::new(FieldType::Text).embeddable())
            .with_field("brand", FieldConfig::new(FieldType::TextKeyword))
            .with_field("description", FieldConfig::new(FieldType::Text).embeddable())
            .with_field("descriptionShort", FieldConfig::new(FieldType::Text))
            .with_field("categoryDefault", FieldConfig::new(FieldType::TextKeyword))
            .with_field("categories", FieldConfig::new(FieldType::Hierarchy))
            .with_field("productUrl", FieldConfig::new(FieldType::Url))
            .with_field("imageUrl", FieldConfig::new(FieldType::ImageUrl))
            .with_field("price", float())
            .with_field("basePrice", float())
            .with_field("priceTaxExcluded", float())
            .with_field("basePriceTaxExcluded", float())
            .with_field(
                "variants",
                FieldConfig::new(FieldType::Variants)
                    .with_attributes([("color", keyword()), ("size", keyword())]),
            )
            .with_field("features", FieldConfig::new(FieldType::NameValueList))
    }
}

fn validate_fields(fields: &BTreeMap<String, FieldConfig>, prefix: &str) -> Result<(), ConfigError> {
    for (name, config) in fields {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "field name must be non-empty (under '{prefix}')"
            )));
        }

        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        if config.field_type == FieldType::Variants && config.attributes.is_none() {
            return Err(ConfigError::Validation(format!(
                "VARIANTS field '{path}' must declare attributes"
            )));
        }

        if let Some(properties) = &config.properties {
            validate_fields(properties, &path)?;
        }
        if let Some(attributes) = &config.attributes {
            validate_fields(attributes, &format!("{path}.attributes"))?;
        }
    }
    Ok(())
}

/// Load and validate a field schema from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_schema(path: &Path) -> Result<FieldSchema, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SchemaFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        FieldSchema::from_json_str(&content)
    } else {
        FieldSchema::from_yaml_str(&content)
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
