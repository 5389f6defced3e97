//! Persona domain module.
//!
//! Classifies a subject into one or more behavioral archetypes from their
//! questionnaire answers.
//!
//! # Module Structure
//!
//! - `persona_type` - The five archetypes and combination keys
//! - `question` - Questionnaire items and their weights
//! - `typing` - Keystroke telemetry captured while answering
//! - `response` - Answers and per-answer semantic scores
//! - `rubric` - Versioned keyword, pattern, distribution and narrative tables
//! - `matcher` - Text and typing matching against the rubric
//! - `classifier` - Per-response scoring and aggregation

mod analysis;
mod classifier;
mod errors;
mod matcher;
mod persona_type;
mod question;
mod response;
mod result;
mod rubric;
mod scorer;
mod typing;

pub use analysis::{PersonaAnalysis, ResponseAnalysis};
pub use classifier::{ClassifierSettings, PersonaClassifier};
pub use errors::{ClassificationError, RubricError};
pub use matcher::fold_text;
pub use persona_type::PersonaType;
pub use question::{PersonaQuestion, QuestionKind, QuestionOption, QuestionWeight};
pub use response::{QuestionResponse, SemanticAnalysis};
pub use result::{PersonaClassificationResult, PersonaComposition, RarityLevel};
pub use rubric::{
    CorrectionHeavyRule, DeliberateRule, FluentRule, NarrativeTemplate, Rubric, TypingRules,
};
pub use typing::{TypingMetrics, TypingRecorder, HESITATION_THRESHOLD_MS, PAUSE_THRESHOLD_MS};
