//! Persona handlers.
//!
//! ## Commands
//! - Classifying a subject and recording the result
//!
//! ## Queries
//! - Latest classification of a subject
//! - Classification history of a subject

mod classify_subject;
mod get_classification;

// Commands
pub use classify_subject::{ClassifySubjectCommand, ClassifySubjectHandler, ClassifySubjectResult};

// Queries
pub use get_classification::{
    GetClassificationHandler, GetClassificationQuery, ListClassificationsHandler,
    ListClassificationsQuery,
};
