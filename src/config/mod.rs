//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DEPLOYMENT_ADVISOR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use deployment_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod ai;
mod database;
mod error;
mod server;
mod wizard;

pub use ai::{AiConfig, AiProvider};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use wizard::WizardConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration. Outcomes are kept in memory when absent.
    pub database: Option<DatabaseConfig>,

    /// AI provider configuration (YandexGPT/OpenAI/mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Wizard session and catalog settings
    #[serde(default)]
    pub wizard: WizardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DEPLOYMENT_ADVISOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DEPLOYMENT_ADVISOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DEPLOYMENT_ADVISOR__AI__YANDEX_FOLDER_ID=...` -> `ai.yandex_folder_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DEPLOYMENT_ADVISOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(ref database) = self.database {
            database.validate()?;
        }
        self.ai.validate()?;
        self.wizard.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DEPLOYMENT_ADVISOR__AI__PRIMARY_PROVIDER",
        "DEPLOYMENT_ADVISOR__AI__YANDEX_API_KEY",
        "DEPLOYMENT_ADVISOR__AI__YANDEX_FOLDER_ID",
        "DEPLOYMENT_ADVISOR__DATABASE__URL",
        "DEPLOYMENT_ADVISOR__SERVER__PORT",
        "DEPLOYMENT_ADVISOR__SERVER__ENVIRONMENT",
        "DEPLOYMENT_ADVISOR__WIZARD__SESSION_TTL_SECS",
    ];

    fn set_minimal_env() {
        env::set_var("DEPLOYMENT_ADVISOR__AI__YANDEX_API_KEY", "AQVN-test");
        env::set_var("DEPLOYMENT_ADVISOR__AI__YANDEX_FOLDER_ID", "b1gtest");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.ai.yandex_folder_id.as_deref(), Some("b1gtest"));
        assert!(config.database.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_database_section_is_optional() {
        let config = load_with(&[(
            "DEPLOYMENT_ADVISOR__DATABASE__URL",
            "postgresql://advisor@localhost/advisor",
        )])
        .unwrap();

        let database = config.database.expect("database section");
        assert_eq!(database.url, "postgresql://advisor@localhost/advisor");
        assert!(database.ensure_schema);
    }

    #[test]
    fn test_is_production() {
        let config = load_with(&[("DEPLOYMENT_ADVISOR__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_values() {
        let config = load_with(&[
            ("DEPLOYMENT_ADVISOR__SERVER__PORT", "3000"),
            ("DEPLOYMENT_ADVISOR__WIZARD__SESSION_TTL_SECS", "120"),
            ("DEPLOYMENT_ADVISOR__AI__PRIMARY_PROVIDER", "mock"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.wizard.session_ttl_secs, 120);
        assert_eq!(config.ai.primary_provider, AiProvider::Mock);
    }

    #[test]
    fn test_default_config_needs_provider_keys() {
        assert!(AppConfig::default().validate().is_err());
    }
}
