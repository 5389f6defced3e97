//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PERSONA_RUBRIC` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use persona_rubric::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Dominance tolerance: {}", config.classifier.tie_tolerance);
//! ```

mod classifier;
mod error;
mod logging;
mod rubric;

pub use classifier::ClassifierConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use rubric::RubricConfig;

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::persona::PersonaClassifier;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Scoring constants
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Rubric source
    #[serde(default)]
    pub rubric: RubricConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERSONA_RUBRIC` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PERSONA_RUBRIC__CLASSIFIER__TIE_TOLERANCE=0.1` -> `classifier.tie_tolerance = 0.1`
    /// - `PERSONA_RUBRIC__RUBRIC__PATH=/etc/rubric.yaml` -> `rubric.path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERSONA_RUBRIC")
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
        self.classifier.validate()?;
        self.rubric.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds a classifier from the configured rubric and settings.
    pub fn build_classifier(&self) -> Result<PersonaClassifier, ConfigError> {
        let rubric = self.rubric.load_rubric()?;
        Ok(PersonaClassifier::new(
            Arc::new(rubric),
            self.classifier.settings(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "PERSONA_RUBRIC__CLASSIFIER__TIE_TOLERANCE",
        "PERSONA_RUBRIC__CLASSIFIER__MIN_CONFIDENCE",
        "PERSONA_RUBRIC__RUBRIC__PATH",
        "PERSONA_RUBRIC__LOGGING__LEVEL",
        "PERSONA_RUBRIC__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.classifier, ClassifierConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.rubric.path.is_none());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PERSONA_RUBRIC__CLASSIFIER__TIE_TOLERANCE", "0.1");
        env::set_var("PERSONA_RUBRIC__CLASSIFIER__MIN_CONFIDENCE", "0.25");
        env::set_var("PERSONA_RUBRIC__LOGGING__LEVEL", "debug");
        env::set_var("PERSONA_RUBRIC__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.classifier.tie_tolerance, 0.1);
        assert_eq!(config.classifier.min_confidence, 0.25);
        assert_eq!(config.classifier.choice_confidence, 0.9);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_section() {
        let mut config = AppConfig::default();
        config.classifier.choice_confidence = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_classifier_applies_settings() {
        let mut config = AppConfig::default();
        config.classifier.tie_tolerance = 0.2;

        let classifier = config.build_classifier().unwrap();
        assert_eq!(classifier.settings().tie_tolerance, 0.2);
    }
}
