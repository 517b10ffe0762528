//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LORDS_PAYMENTS_` prefix and nested values use underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use lords_payments::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod error;
mod payment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use payment::{PaymentConfig, SquareEnvironment};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the payments service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Square)
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LORDS_PAYMENTS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `LORDS_PAYMENTS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `LORDS_PAYMENTS__PAYMENT__LOCATION_ID=...` -> `payment.location_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LORDS_PAYMENTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration so that a misconfigured
    /// deployment fails at startup rather than at the first charge attempt:
    /// - Port and timeout ranges
    /// - Square credential presence and prefixes
    /// - Sandbox credentials are rejected in production
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
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

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var(
            "LORDS_PAYMENTS__PAYMENT__APPLICATION_ID",
            "sandbox-sq0idb-abcd1234",
        );
        env::set_var("LORDS_PAYMENTS__PAYMENT__LOCATION_ID", "L8XYZ");
        env::set_var("LORDS_PAYMENTS__PAYMENT__ACCESS_TOKEN", "EAAAtest");
        env::set_var("LORDS_PAYMENTS__PAYMENT__WEBHOOK_SIGNATURE_KEY", "wh_key");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("LORDS_PAYMENTS__PAYMENT__APPLICATION_ID");
        env::remove_var("LORDS_PAYMENTS__PAYMENT__LOCATION_ID");
        env::remove_var("LORDS_PAYMENTS__PAYMENT__ACCESS_TOKEN");
        env::remove_var("LORDS_PAYMENTS__PAYMENT__WEBHOOK_SIGNATURE_KEY");
        env::remove_var("LORDS_PAYMENTS__PAYMENT__ENVIRONMENT");
        env::remove_var("LORDS_PAYMENTS__SERVER__PORT");
        env::remove_var("LORDS_PAYMENTS__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.location_id, "L8XYZ");
        assert_eq!(config.payment.environment, SquareEnvironment::Sandbox);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LORDS_PAYMENTS__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("LORDS_PAYMENTS__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
