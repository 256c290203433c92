use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Field schema file (YAML or JSON). `None` means the built-in catalog schema.
    pub schema_path: Option<PathBuf>,
    /// Abort the whole PrestaShop batch when an item lacks `remoteId` or `sku`.
    pub prestashop_strict: bool,
    /// Storefront base URL used to build Magento product URLs from `url_key`.
    pub magento_base_url: Option<String>,
}
