//! Configuration error types

use thiserror::Error;

use crate::domain::persona::RubricError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Rubric unavailable: {0}")]
    Rubric(#[from] RubricError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be within [0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero, got {value}")]
    ZeroConfidence { field: &'static str, value: f64 },

    #[error("choice_confidence ({choice}) must not be below min_confidence ({min})")]
    ChoiceBelowMinimum { choice: f64, min: f64 },

    #[error("evidence_saturation must be positive, got {0}")]
    NonPositiveSaturation(f64),

    #[error("Unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("Rubric path is empty")]
    EmptyRubricPath,
}
