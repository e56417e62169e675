//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `CLASSBOOK`
//! prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use classbook::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ConfigValidationError};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection).
    pub database: DatabaseConfig,

    /// Authentication configuration (password hashing pepper).
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `CLASSBOOK` prefix:
    ///
    /// - `CLASSBOOK__DATABASE__URL=postgres://...`
    /// - `CLASSBOOK__AUTH__PASSWORD_PEPPER=...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASSBOOK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}
