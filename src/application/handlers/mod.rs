//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod persona;

pub use persona::{
    ClassifySubjectCommand, ClassifySubjectHandler, ClassifySubjectResult,
    GetClassificationHandler, GetClassificationQuery, ListClassificationsHandler,
    ListClassificationsQuery,
};
