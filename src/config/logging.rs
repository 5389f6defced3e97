//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default level: trace, debug, info, warn or error
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.level
            .parse::<tracing::Level>()
            .map(|_| ())
            .map_err(|_| ValidationError::UnknownLogLevel(self.level.clone()))
    }
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
