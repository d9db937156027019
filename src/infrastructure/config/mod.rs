use crate::domain::error::{AppError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

pub const CONFIG_FILE: &str = "FootballStats.toml";
pub const ENV_PREFIX: &str = "FOOTBALL_";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(length(min = 1))]
    pub database_url: String,
    #[validate(range(min = 1))]
    pub max_connections: u32,
    pub csv_path: PathBuf,
    #[validate(length(min = 1))]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "sqlite://football.db".to_string(),
            max_connections: 5,
            csv_path: PathBuf::from("./football_data.csv"),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `FootballStats.toml`, then `FOOTBALL_*` environment variables.
    pub fn load() -> Result<Self> {
        // A missing .env is fine; anything else set in the shell still applies.
        let _ = dotenvy::dotenv();
        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        if config.csv_path.as_os_str().is_empty() {
            return Err(AppError::ConfigError("csv_path cannot be empty".to_string()));
        }
        config
            .validate()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    #[test]
    fn test_defaults_match_original_deployment() {
        let config = AppConfig::from_figment(defaults()).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.csv_path, PathBuf::from("./football_data.csv"));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let figment = defaults().merge(Toml::string(
            r#"
            port = 8080
            database_url = "sqlite::memory:"
            csv_path = "data/seasons.csv"
            "#,
        ));
        let config = AppConfig::from_figment(figment).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.csv_path, PathBuf::from("data/seasons.csv"));
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let figment = defaults().merge(Toml::string("port = 0"));
        let err = AppConfig::from_figment(figment).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_empty_database_url_is_rejected() {
        let figment = defaults().merge(Toml::string(r#"database_url = """#));
        assert!(AppConfig::from_figment(figment).is_err());
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let figment = defaults().merge(Toml::string(r#"port = "not-a-port""#));
        let err = AppConfig::from_figment(figment).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
