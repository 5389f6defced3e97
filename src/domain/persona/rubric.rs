//! Scoring rubric - versioned keyword tables, structural patterns,
//! typing thresholds, population distribution and narrative templates.
//!
//! The rubric is configuration data. The default document is embedded in
//! the binary via `include_str!`; an alternative file can be loaded with
//! [`Rubric::from_path`] so the tables evolve without touching the
//! aggregation algorithm.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{fold_text, PersonaType, RarityLevel, RubricError};

const EMBEDDED_RUBRIC_YAML: &str = include_str!("rubric.yaml");

static EMBEDDED_RUBRIC: Lazy<Rubric> = Lazy::new(|| {
    Rubric::from_yaml_str(EMBEDDED_RUBRIC_YAML).expect("Embedded rubric must be valid")
});

// ════════════════════════════════════════════════════════════════════════════════
// Document (serialized form)
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
struct RubricDocument {
    version: String,
    fallback_persona: PersonaType,
    personas: BTreeMap<PersonaType, PersonaRulesDocument>,
    typing: TypingRules,
    distribution: DistributionDocument,
    narratives: BTreeMap<String, NarrativeTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
struct PersonaRulesDocument {
    keywords: Vec<String>,
    #[serde(default)]
    structural: Vec<StructuralRuleDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StructuralRuleDocument {
    Pattern {
        name: String,
        regex: String,
        #[serde(default = "default_min_matches")]
        min_matches: usize,
        weight: f64,
    },
    Concise {
        name: String,
        max_words: usize,
        weight: f64,
    },
}

fn default_min_matches() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
struct DistributionDocument {
    default_percentage: f64,
    combinations: BTreeMap<String, f64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Validated rubric
// ════════════════════════════════════════════════════════════════════════════════

/// Typing-behaviour thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingRules {
    pub correction_heavy: CorrectionHeavyRule,
    pub fluent: FluentRule,
    pub deliberate: DeliberateRule,
}

/// Many deletions or long hesitations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionHeavyRule {
    pub persona: PersonaType,
    pub weight: f64,
    pub min_backspace_ratio: f64,
    pub min_hesitations: u32,
}

/// Fast typing with almost no pauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluentRule {
    pub persona: PersonaType,
    pub weight: f64,
    pub min_chars_per_second: f64,
    pub max_pauses: u32,
}

/// Many pauses but few corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberateRule {
    pub persona: PersonaType,
    pub weight: f64,
    pub min_pauses: u32,
    pub max_backspace_ratio: f64,
}

/// Static narrative text for a persona or combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeTemplate {
    pub display_name: String,
    pub description: String,
    pub business_impact: String,
    pub transformation_potential: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Keyword {
    pub(crate) display: String,
    pub(crate) folded: String,
}

#[derive(Debug, Clone)]
pub(crate) enum StructuralRule {
    Pattern {
        name: String,
        regex: Regex,
        min_matches: usize,
        weight: f64,
    },
    Concise {
        name: String,
        max_words: usize,
        weight: f64,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct PersonaRules {
    pub(crate) keywords: Vec<Keyword>,
    pub(crate) structural: Vec<StructuralRule>,
}

/// A validated scoring rubric.
#[derive(Debug, Clone)]
pub struct Rubric {
    version: String,
    fallback_persona: PersonaType,
    pub(crate) personas: BTreeMap<PersonaType, PersonaRules>,
    pub(crate) typing: TypingRules,
    default_percentage: f64,
    distribution: BTreeMap<String, f64>,
    narratives: BTreeMap<String, NarrativeTemplate>,
}

impl Rubric {
    /// The rubric shipped with the crate.
    pub fn embedded() -> &'static Rubric {
        &EMBEDDED_RUBRIC
    }

    /// Parses and validates a YAML rubric document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, RubricError> {
        let document: RubricDocument = serde_yaml::from_str(yaml)?;
        Self::from_document(document)
    }

    /// Reads a YAML rubric from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RubricError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rubric = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), version = %rubric.version, "Loaded rubric");
        Ok(rubric)
    }

    fn from_document(document: RubricDocument) -> Result<Self, RubricError> {
        if document.version.trim().is_empty() {
            return Err(RubricError::Invalid("version cannot be empty".to_string()));
        }

        let mut personas = BTreeMap::new();
        for persona in PersonaType::ALL {
            let rules = document.personas.get(&persona).ok_or_else(|| {
                RubricError::Invalid(format!("missing rules for persona '{}'", persona.key()))
            })?;
            personas.insert(persona, compile_rules(persona, rules)?);
        }

        validate_typing(&document.typing)?;

        let default_percentage = document.distribution.default_percentage;
        validate_percentage("default_percentage", default_percentage)?;
        if RarityLevel::from_percentage(default_percentage) != RarityLevel::ExtremelyRare {
            return Err(RubricError::Invalid(format!(
                "default_percentage must fall in the extremely_rare tier, got {}",
                default_percentage
            )));
        }
        for (key, percentage) in &document.distribution.combinations {
            PersonaType::parse_combination_key(key)?;
            validate_percentage(key, *percentage)?;
        }

        for key in document.narratives.keys() {
            PersonaType::parse_combination_key(key)?;
        }
        for persona in PersonaType::ALL {
            if !document.narratives.contains_key(persona.key()) {
                return Err(RubricError::Invalid(format!(
                    "missing narrative for persona '{}'",
                    persona.key()
                )));
            }
        }

        Ok(Self {
            version: document.version,
            fallback_persona: document.fallback_persona,
            personas,
            typing: document.typing,
            default_percentage: document.distribution.default_percentage,
            distribution: document.distribution.combinations,
            narratives: document.narratives,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Archetype signaled by an answer that matches nothing.
    pub fn fallback_persona(&self) -> PersonaType {
        self.fallback_persona
    }

    /// Population percentage for a combination key, if the table has it.
    pub fn population_percentage(&self, combination_key: &str) -> Option<f64> {
        self.distribution.get(combination_key).copied()
    }

    /// Percentage used when a combination is absent from the table.
    pub fn default_percentage(&self) -> f64 {
        self.default_percentage
    }

    /// Combination keys and percentages, ordered by key.
    pub fn distribution(&self) -> impl Iterator<Item = (&str, f64)> {
        self.distribution.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Narrative for the combination key, else for the primary archetype.
    pub fn narrative_for(
        &self,
        combination_key: &str,
        primary: PersonaType,
    ) -> Option<&NarrativeTemplate> {
        self.narratives
            .get(combination_key)
            .or_else(|| self.narratives.get(primary.key()))
    }

    /// Whether the combination key has its own narrative template.
    pub fn has_narrative(&self, combination_key: &str) -> bool {
        self.narratives.contains_key(combination_key)
    }
}

fn compile_rules(
    persona: PersonaType,
    document: &PersonaRulesDocument,
) -> Result<PersonaRules, RubricError> {
    let keywords = document
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| Keyword {
            display: k.to_string(),
            folded: fold_text(k),
        })
        .collect::<Vec<_>>();

    if keywords.is_empty() {
        return Err(RubricError::Invalid(format!(
            "persona '{}' has no keywords",
            persona.key()
        )));
    }
    for keyword in &keywords {
        if let Some(broader) = keywords
            .iter()
            .find(|other| other.folded != keyword.folded && other.folded.contains(&keyword.folded))
        {
            return Err(RubricError::Invalid(format!(
                "persona '{}' keyword '{}' already matches inside '{}'",
                persona.key(),
                keyword.display,
                broader.display
            )));
        }
    }

    let mut structural = Vec::with_capacity(document.structural.len());
    for rule in &document.structural {
        let compiled = match rule {
            StructuralRuleDocument::Pattern {
                name,
                regex,
                min_matches,
                weight,
            } => {
                validate_weight(name, *weight)?;
                if *min_matches == 0 {
                    return Err(RubricError::Invalid(format!(
                        "pattern '{}' must require at least one match",
                        name
                    )));
                }
                let regex = Regex::new(regex).map_err(|source| RubricError::InvalidPattern {
                    persona,
                    name: name.clone(),
                    source,
                })?;
                StructuralRule::Pattern {
                    name: name.clone(),
                    regex,
                    min_matches: *min_matches,
                    weight: *weight,
                }
            }
            StructuralRuleDocument::Concise {
                name,
                max_words,
                weight,
            } => {
                validate_weight(name, *weight)?;
                if *max_words == 0 {
                    return Err(RubricError::Invalid(format!(
                        "concise rule '{}' needs max_words >= 1",
                        name
                    )));
                }
                StructuralRule::Concise {
                    name: name.clone(),
                    max_words: *max_words,
                    weight: *weight,
                }
            }
        };
        structural.push(compiled);
    }

    Ok(PersonaRules {
        keywords,
        structural,
    })
}

fn validate_weight(name: &str, weight: f64) -> Result<(), RubricError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(RubricError::Invalid(format!(
            "rule '{}' must have a positive weight, got {}",
            name, weight
        )));
    }
    Ok(())
}

fn validate_ratio(name: &str, ratio: f64) -> Result<(), RubricError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(RubricError::Invalid(format!(
            "'{}' must be between 0 and 1, got {}",
            name, ratio
        )));
    }
    Ok(())
}

fn validate_percentage(name: &str, percentage: f64) -> Result<(), RubricError> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(RubricError::Invalid(format!(
            "percentage for '{}' must be between 0 and 100, got {}",
            name, percentage
        )));
    }
    Ok(())
}

fn validate_typing(rules: &TypingRules) -> Result<(), RubricError> {
    validate_weight("typing.correction_heavy", rules.correction_heavy.weight)?;
    validate_ratio(
        "typing.correction_heavy.min_backspace_ratio",
        rules.correction_heavy.min_backspace_ratio,
    )?;
    validate_weight("typing.fluent", rules.fluent.weight)?;
    if !rules.fluent.min_chars_per_second.is_finite() || rules.fluent.min_chars_per_second <= 0.0 {
        return Err(RubricError::Invalid(
            "typing.fluent.min_chars_per_second must be positive".to_string(),
        ));
    }
    validate_weight("typing.deliberate", rules.deliberate.weight)?;
    validate_ratio(
        "typing.deliberate.max_backspace_ratio",
        rules.deliberate.max_backspace_ratio,
    )?;
    Ok(())
}
