//! Server Configuration
//!
//! Loaded from an optional `house-price.toml` and `HOUSE_PRICE__*` environment
//! variables, the latter taking precedence. Nested keys use `__`, for example
//! `HOUSE_PRICE__RATE_LIMIT__BURST_SIZE=20`.

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment, File};
use constraint_engine::ValidationConfig;
use feature_engine::ExpectedFeatures;
use serde::Deserialize;

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "house-price";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    pub rate_limit: RateLimitConfig,
    /// Feature list of the deployed model; the canonical list when unset
    pub expected_features: Option<ExpectedFeatures>,
    /// Year ages are measured against; the clock when unset
    pub current_year: Option<i32>,
    pub validation: ValidationConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            rate_limit: RateLimitConfig::default(),
            expected_features: None,
            current_year: None,
            validation: ValidationConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load from `house-price.toml` (if present) and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from a named file (extension optional) and the environment
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("HOUSE_PRICE")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("expected_features"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn expected_features(&self) -> ExpectedFeatures {
        self.expected_features.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.expected_features(), ExpectedFeatures::canonical());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            bind_addr = "127.0.0.1:9000"
            log_format = "json"
            expected_features = ["OverallQual", "TotalSF"]
            current_year = 2024

            [rate_limit]
            burst_size = 20

            [validation]
            min_year = 1870
        "#;
        let config: ApiConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.expected_features().len(), 2);
        assert_eq!(config.current_year, Some(2024));
        assert_eq!(config.rate_limit.burst_size, 20);
        assert_eq!(config.rate_limit.per_second, RateLimitConfig::default().per_second);
        assert_eq!(config.validation.min_year, 1870);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ApiConfig::load_from("does-not-exist").unwrap();
        assert_eq!(config.log_level, "info");
    }
}
