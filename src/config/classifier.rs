//! Classifier tuning configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::persona::ClassifierSettings;

/// Scoring constants, overridable per deployment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// Relative tolerance for dominant archetypes
    #[serde(default = "default_tie_tolerance")]
    pub tie_tolerance: f64,

    /// Confidence of a tagged multiple-choice answer
    #[serde(default = "default_choice_confidence")]
    pub choice_confidence: f64,

    /// Confidence floor for free-text answers
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Raw score treated as conclusive evidence
    #[serde(default = "default_evidence_saturation")]
    pub evidence_saturation: f64,
}

impl ClassifierConfig {
    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("tie_tolerance", self.tie_tolerance),
            ("choice_confidence", self.choice_confidence),
            ("min_confidence", self.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::FractionOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("choice_confidence", self.choice_confidence),
            ("min_confidence", self.min_confidence),
        ] {
            if value == 0.0 {
                return Err(ValidationError::ZeroConfidence { field, value });
            }
        }
        if self.choice_confidence < self.min_confidence {
            return Err(ValidationError::ChoiceBelowMinimum {
                choice: self.choice_confidence,
                min: self.min_confidence,
            });
        }
        if self.evidence_saturation.is_nan() || self.evidence_saturation <= 0.0 {
            return Err(ValidationError::NonPositiveSaturation(
                self.evidence_saturation,
            ));
        }
        Ok(())
    }

    pub fn settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            tie_tolerance: self.tie_tolerance,
            choice_confidence: self.choice_confidence,
            min_confidence: self.min_confidence,
            evidence_saturation: self.evidence_saturation,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tie_tolerance: default_tie_tolerance(),
            choice_confidence: default_choice_confidence(),
            min_confidence: default_min_confidence(),
            evidence_saturation: default_evidence_saturation(),
        }
    }
}

impl From<ClassifierConfig> for ClassifierSettings {
    fn from(config: ClassifierConfig) -> Self {
        config.settings()
    }
}

fn default_tie_tolerance() -> f64 {
    ClassifierSettings::default().tie_tolerance
}

fn default_choice_confidence() -> f64 {
    ClassifierSettings::default().choice_confidence
}

fn default_min_confidence() -> f64 {
    ClassifierSettings::default().min_confidence
}

fn default_evidence_saturation() -> f64 {
    ClassifierSettings::default().evidence_saturation
}
