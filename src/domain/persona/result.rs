//! Final classification output for a subject.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{PersonaType, ResponseAnalysis};

/// How many archetypes are co-dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaComposition {
    Pure,
    Dual,
    Triple,
    Complex,
}

impl PersonaComposition {
    pub fn from_count(dominant: usize) -> Self {
        match dominant {
            0 | 1 => Self::Pure,
            2 => Self::Dual,
            3 => Self::Triple,
            _ => Self::Complex,
        }
    }
}

impl fmt::Display for PersonaComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pure => write!(f, "pure"),
            Self::Dual => write!(f, "dual"),
            Self::Triple => write!(f, "triple"),
            Self::Complex => write!(f, "complex"),
        }
    }
}

/// Rarity tier derived from the population percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityLevel {
    VeryCommon,
    Common,
    Rare,
    VeryRare,
    ExtremelyRare,
}

impl RarityLevel {
    /// Maps a population percentage onto a tier using half-open breakpoints:
    /// `>= 10`, `[5, 10)`, `[2, 5)`, `[0.5, 2)`, `< 0.5`.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 10.0 {
            Self::VeryCommon
        } else if percentage >= 5.0 {
            Self::Common
        } else if percentage >= 2.0 {
            Self::Rare
        } else if percentage >= 0.5 {
            Self::VeryRare
        } else {
            Self::ExtremelyRare
        }
    }
}

impl fmt::Display for RarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryCommon => write!(f, "very_common"),
            Self::Common => write!(f, "common"),
            Self::Rare => write!(f, "rare"),
            Self::VeryRare => write!(f, "very_rare"),
            Self::ExtremelyRare => write!(f, "extremely_rare"),
        }
    }
}

/// The classification computed once all responses of a subject are in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaClassificationResult {
    /// First of `dominant_personas`
    pub persona_type: PersonaType,
    pub persona_display_name: String,
    /// Top weighted score over the sum of all weighted scores
    pub confidence: f64,
    pub description: String,
    /// Always holds all five archetypes
    pub weighted_scores: BTreeMap<PersonaType, f64>,
    /// Never empty; descending score, ties in declaration order
    pub dominant_personas: Vec<PersonaType>,
    pub persona_composition: PersonaComposition,
    pub combination_key: String,
    pub population_percentage: f64,
    pub rarity_level: RarityLevel,
    pub business_impact: String,
    pub transformation_potential: String,
    pub rubric_version: String,
    pub response_analyses: Vec<ResponseAnalysis>,
}

impl PersonaClassificationResult {
    pub fn score(&self, persona: PersonaType) -> f64 {
        self.weighted_scores.get(&persona).copied().unwrap_or(0.0)
    }
}
