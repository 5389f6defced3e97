//! Questionnaire prompts shown to a subject.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{QuestionId, ValidationError};

use super::PersonaType;

/// Influence of a question on the aggregate score (1x, 2x or 3x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QuestionWeight {
    #[default]
    Standard,
    Important,
    Critical,
}

impl QuestionWeight {
    pub fn multiplier(&self) -> f64 {
        f64::from(u8::from(*self))
    }
}

impl TryFrom<u8> for QuestionWeight {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::Important),
            3 => Ok(Self::Critical),
            other => Err(ValidationError::out_of_range("weight", 1, 3, i64::from(other))),
        }
    }
}

impl From<QuestionWeight> for u8 {
    fn from(weight: QuestionWeight) -> Self {
        match weight {
            QuestionWeight::Standard => 1,
            QuestionWeight::Important => 2,
            QuestionWeight::Critical => 3,
        }
    }
}

/// One selectable answer of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Value submitted when the option is selected
    pub value: String,
    pub label: String,
    /// Archetype this option is authoritative for, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<PersonaType>,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            persona: None,
        }
    }

    pub fn tagged(value: impl Into<String>, label: impl Into<String>, persona: PersonaType) -> Self {
        Self {
            persona: Some(persona),
            ..Self::new(value, label)
        }
    }

    fn matches(&self, answer: &str) -> bool {
        let answer = answer.trim();
        self.value == answer || self.label.trim().eq_ignore_ascii_case(answer)
    }
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<QuestionOption> },
    OpenEnded {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
}

/// A prompt shown to the subject. Configuration data; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(default)]
    pub weight: QuestionWeight,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl PersonaQuestion {
    /// Creates an open-ended (free text) question.
    pub fn open_ended(
        id: QuestionId,
        text: impl Into<String>,
        weight: QuestionWeight,
    ) -> Result<Self, ValidationError> {
        let question = Self {
            id,
            text: text.into(),
            subtext: None,
            weight,
            kind: QuestionKind::OpenEnded { placeholder: None },
        };
        question.validate()?;
        Ok(question)
    }

    /// Creates a multiple-choice question.
    pub fn multiple_choice(
        id: QuestionId,
        text: impl Into<String>,
        weight: QuestionWeight,
        options: Vec<QuestionOption>,
    ) -> Result<Self, ValidationError> {
        let question = Self {
            id,
            text: text.into(),
            subtext: None,
            weight,
            kind: QuestionKind::MultipleChoice { options },
        };
        question.validate()?;
        Ok(question)
    }

    /// Checks invariants that deserialized questions may violate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }

        if let QuestionKind::MultipleChoice { options } = &self.kind {
            if options.is_empty() {
                return Err(ValidationError::empty_field("options"));
            }
            let mut seen = HashSet::new();
            for option in options {
                if option.value.trim().is_empty() {
                    return Err(ValidationError::empty_field("options.value"));
                }
                if !seen.insert(option.value.as_str()) {
                    return Err(ValidationError::invalid_format(
                        "options",
                        format!("duplicate option value '{}'", option.value),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn is_open_ended(&self) -> bool {
        matches!(self.kind, QuestionKind::OpenEnded { .. })
    }

    /// Finds the option selected by an answer, matching value exactly or label case-insensitively.
    pub fn find_option(&self, answer: &str) -> Option<&QuestionOption> {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options.iter().find(|o| o.matches(answer)),
            QuestionKind::OpenEnded { .. } => None,
        }
    }
}
