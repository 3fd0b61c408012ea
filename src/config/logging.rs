//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::ValidationError;

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `hem_lca=debug,warn`
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Builds the subscriber filter. `RUST_LOG` takes precedence when set.
    pub fn env_filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|_| ValidationError::InvalidLogLevel(self.level.clone()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidLogLevel(self.level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_plain() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn accepts_directives() {
        let config = LoggingConfig {
            level: "hem_lca=debug,warn".into(),
            json: true,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_garbage_level() {
        let config = LoggingConfig {
            level: "hem_lca=loud".into(),
            json: false,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }
}
