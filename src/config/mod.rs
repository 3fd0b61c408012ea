//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEM_LCA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hem_lca::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Classifying by {}", config.run.classification_system);
//! ```

mod error;
mod logging;
mod run;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use run::RunConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Analysis inputs, outputs and options
    #[serde(default)]
    pub run: RunConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `HEM_LCA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HEM_LCA__RUN__SNAPSHOT_PATH=db.json` -> `run.snapshot_path = "db.json"`
    /// - `HEM_LCA__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEM_LCA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
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
        self.logging.validate()?;
        self.run.validate()?;
        Ok(())
    }
}
