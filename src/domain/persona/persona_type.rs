//! The five behavioural archetypes a subject can be classified into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Closed set of persona archetypes.
///
/// Declaration order is the stable tie-break order used when ranking
/// archetypes with equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonaType {
    /// Data, criteria, structured process
    #[serde(alias = "analitico")]
    Analitico,
    /// Feelings, relationships, personal narrative
    #[serde(alias = "emotivo")]
    Emotivo,
    /// Results, speed, concise answers
    #[serde(alias = "pragmatico")]
    Pragmatico,
    /// Ideas, alternatives, exploration
    #[serde(alias = "criativo")]
    Criativo,
    /// Doubt, hedging, hesitation
    #[serde(alias = "inseguro")]
    Inseguro,
}

impl PersonaType {
    /// All archetypes in declaration order.
    pub const ALL: [PersonaType; 5] = [
        PersonaType::Analitico,
        PersonaType::Emotivo,
        PersonaType::Pragmatico,
        PersonaType::Criativo,
        PersonaType::Inseguro,
    ];

    /// Lowercase key used in combination keys and rubric tables.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Analitico => "analitico",
            Self::Emotivo => "emotivo",
            Self::Pragmatico => "pragmatico",
            Self::Criativo => "criativo",
            Self::Inseguro => "inseguro",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Analitico => "Analítico",
            Self::Emotivo => "Emotivo",
            Self::Pragmatico => "Pragmático",
            Self::Criativo => "Criativo",
            Self::Inseguro => "Inseguro",
        }
    }

    /// Builds the canonical combination key: keys sorted alphabetically, joined with `-`.
    pub fn combination_key(personas: &[PersonaType]) -> String {
        let mut keys: Vec<&'static str> = personas.iter().map(|p| p.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.join("-")
    }

    /// Parses a combination key back into its archetypes.
    ///
    /// Fails if any part is unknown, repeated, or the parts are not in canonical order.
    pub fn parse_combination_key(key: &str) -> Result<Vec<PersonaType>, ValidationError> {
        let personas = key
            .split('-')
            .map(PersonaType::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        if Self::combination_key(&personas) != key {
            return Err(ValidationError::invalid_format(
                "combination_key",
                format!("'{}' is not in canonical sorted form", key),
            ));
        }
        Ok(personas)
    }
}

impl fmt::Display for PersonaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PersonaType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analitico" => Ok(Self::Analitico),
            "emotivo" => Ok(Self::Emotivo),
            "pragmatico" => Ok(Self::Pragmatico),
            "criativo" => Ok(Self::Criativo),
            "inseguro" => Ok(Self::Inseguro),
            other => Err(ValidationError::invalid_format(
                "persona_type",
                format!("unknown persona '{}'", other),
            )),
        }
    }
}
