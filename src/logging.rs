//! Logging infrastructure using tracing + tracing-subscriber
//!
//! Logs go to stderr so that command output on stdout stays machine-readable.
//! `RUST_LOG` overrides the configured level for per-module filtering.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// Errors installing the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Initialize the logging system
///
/// Fails if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(&config.level)?;
    let layer = build_console_layer(config.json);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}

/// Build the environment filter with support for RUST_LOG
fn build_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = default_level.to_lowercase();
    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        directive,
        reason: e.to_string(),
    })
}

/// Build the console output layer
fn build_console_layer<S>(json_format: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if json_format {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_accepts_configured_level() {
        assert!(build_env_filter("debug").is_ok());
        assert!(build_env_filter("WARN").is_ok());
    }

    #[test]
    fn test_init_twice_fails_second_time() {
        let config = LoggingConfig::default();
        let _ = init(&config);

        assert!(matches!(init(&config), Err(LoggingError::Init(_))));
    }
}
