pub mod app_config;
pub mod config;
pub mod locale;
pub mod products;
pub mod schema;
pub mod transform;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use locale::{
    expand_locales, localized_entries, localized_field_name, split_localized_field_name,
    Localized, DEFAULT_LOCALE,
};
pub use products::{CanonicalProduct, ImageUrls, NameValue, ProductVariant, VariantAttribute};
pub use schema::{load_schema, FieldConfig, FieldSchema, FieldType};
pub use transform::{ItemError, ItemErrorKind, TransformOutput};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read schema file {path}: {source}")]
    SchemaFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema YAML: {0}")]
    SchemaFileParse(#[from] serde_yaml::Error),

    #[error("failed to parse schema JSON: {0}")]
    SchemaJsonParse(#[from] serde_json::Error),

    #[error("schema validation error: {0}")]
    Validation(String),
}
