//! Persona classification error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, ValidationError};

use super::PersonaType;

/// Caller contract violations detected before any scoring happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("Question {question_id} has no response")]
    MissingResponse { question_id: QuestionId },

    #[error("Question {question_id} has more than one response")]
    DuplicateResponse { question_id: QuestionId },

    #[error("Question {question_id} appears more than once in the questionnaire")]
    DuplicateQuestion { question_id: QuestionId },
}

impl ClassificationError {
    pub fn question_id(&self) -> QuestionId {
        match self {
            Self::MissingResponse { question_id }
            | Self::DuplicateResponse { question_id }
            | Self::DuplicateQuestion { question_id } => *question_id,
        }
    }
}

impl From<ClassificationError> for DomainError {
    fn from(err: ClassificationError) -> Self {
        let code = match err {
            ClassificationError::MissingResponse { .. } => ErrorCode::MissingResponse,
            ClassificationError::DuplicateResponse { .. } => ErrorCode::DuplicateResponse,
            ClassificationError::DuplicateQuestion { .. } => ErrorCode::DuplicateQuestion,
        };
        DomainError::new(code, err.to_string())
            .with_detail("question_id", err.question_id().to_string())
    }
}

/// Errors loading or validating a scoring rubric.
#[derive(Debug, Error)]
pub enum RubricError {
    #[error("Failed to read rubric file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rubric: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid pattern '{name}' for {persona}: {source}")]
    InvalidPattern {
        persona: PersonaType,
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid rubric: {0}")]
    Invalid(String),

    #[error("Invalid rubric: {0}")]
    Validation(#[from] ValidationError),
}

impl From<RubricError> for DomainError {
    fn from(err: RubricError) -> Self {
        DomainError::new(ErrorCode::RubricUnavailable, err.to_string())
    }
}
