//! Rubric source configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::persona::{Rubric, RubricError};

/// Where the scoring rubric comes from.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct RubricConfig {
    /// YAML rubric file; the embedded rubric is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl RubricConfig {
    /// Validate rubric configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if path.as_os_str().is_empty() => Err(ValidationError::EmptyRubricPath),
            _ => Ok(()),
        }
    }

    /// Loads the configured rubric.
    pub fn load_rubric(&self) -> Result<Rubric, RubricError> {
        match &self.path {
            Some(path) => Rubric::from_path(path),
            None => Ok(Rubric::embedded().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_embedded_rubric() {
        let rubric = RubricConfig::default().load_rubric().unwrap();
        assert_eq!(rubric.version(), Rubric::embedded().version());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let config = RubricConfig {
            path: Some(PathBuf::from("/definitely/not/here/rubric.yaml")),
        };
        assert!(matches!(config.load_rubric(), Err(RubricError::Io { .. })));
    }

    #[test]
    fn test_empty_path_fails_validation() {
        let config = RubricConfig {
            path: Some(PathBuf::new()),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyRubricPath));
    }
}
