use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{raw}'"),
        })
    };

    let env = parse_environment(&or_default("CATSYNC_ENV", "development"));
    let log_level = or_default("CATSYNC_LOG_LEVEL", "info");
    let schema_path = optional("CATSYNC_SCHEMA_PATH").map(PathBuf::from);
    let prestashop_strict = parse_flag("CATSYNC_PRESTASHOP_STRICT", "false")?;

    let magento_base_url = optional("CATSYNC_MAGENTO_BASE_URL");
    if let Some(base) = &magento_base_url {
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: "CATSYNC_MAGENTO_BASE_URL".to_string(),
                reason: format!("expected an http(s) URL, got '{base}'"),
            });
        }
    }

    Ok(AppConfig {
        env,
        log_level,
        schema_path,
        prestashop_strict,
        magento_base_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.schema_path.is_none());
        assert!(!cfg.prestashop_strict);
        assert!(cfg.magento_base_url.is_none());
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_ENV", "production");
        map.insert("CATSYNC_LOG_LEVEL", "debug");
        map.insert("CATSYNC_SCHEMA_PATH", "./config/schema.yaml");
        map.insert("CATSYNC_PRESTASHOP_STRICT", "true");
        map.insert("CATSYNC_MAGENTO_BASE_URL", "https://shop.example.com/");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(
            cfg.schema_path.as_deref(),
            Some(std::path::Path::new("./config/schema.yaml"))
        );
        assert!(cfg.prestashop_strict);
        assert_eq!(
            cfg.magento_base_url.as_deref(),
            Some("https://shop.example.com/")
        );
    }

    #[test]
    fn build_app_config_blank_schema_path_is_none() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_SCHEMA_PATH", "   ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.schema_path.is_none());
    }

    #[test]
    fn build_app_config_rejects_invalid_strict_flag() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_PRESTASHOP_STRICT", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATSYNC_PRESTASHOP_STRICT"),
            "expected InvalidEnvVar(CATSYNC_PRESTASHOP_STRICT), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_http_magento_base_url() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_MAGENTO_BASE_URL", "shop.example.com");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATSYNC_MAGENTO_BASE_URL"),
            "expected InvalidEnvVar(CATSYNC_MAGENTO_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("nope"), None);
    }
}
