//! Per-response scoring result.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::QuestionId;

use super::{PersonaType, QuestionWeight};

/// The archetype one response most signals, and how strongly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaAnalysis {
    pub persona_type: PersonaType,
    /// In [0, 1]
    pub confidence: f64,
    pub indicators: Vec<String>,
    /// Archetypes whose raw score tied with `persona_type`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tied_with: Vec<PersonaType>,
}

impl PersonaAnalysis {
    pub fn new(persona_type: PersonaType, confidence: f64, indicators: Vec<String>) -> Self {
        Self {
            persona_type,
            confidence: confidence.clamp(0.0, 1.0),
            indicators,
            tied_with: Vec::new(),
        }
    }

    pub fn with_ties(mut self, tied_with: Vec<PersonaType>) -> Self {
        self.tied_with = tied_with;
        self
    }

    /// The signaled archetype followed by any tied ones.
    pub fn signaled(&self) -> Vec<PersonaType> {
        std::iter::once(self.persona_type)
            .chain(self.tied_with.iter().copied())
            .collect()
    }
}

/// A scored response kept on the final result for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnalysis {
    pub question_id: QuestionId,
    pub weight: QuestionWeight,
    pub analysis: PersonaAnalysis,
}
