//! ClassificationRepository port - Persistence for completed classifications.
//!
//! The classifier itself is pure. Callers that want to keep history
//! (re-classification after a subject retakes the questionnaire, audit of
//! which rubric version produced a result) go through this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassificationId, DomainError, SubjectId, Timestamp};
use crate::domain::persona::PersonaClassificationResult;

/// A stored classification outcome for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub id: ClassificationId,
    pub subject_id: SubjectId,
    pub result: PersonaClassificationResult,
    /// When the classification was produced.
    pub classified_at: Timestamp,
}

impl ClassificationRecord {
    /// Creates a record stamped with the current time.
    pub fn new(subject_id: SubjectId, result: PersonaClassificationResult) -> Self {
        Self {
            id: ClassificationId::new(),
            subject_id,
            result,
            classified_at: Timestamp::now(),
        }
    }

    /// Overrides the classification time.
    pub fn classified_at(mut self, at: Timestamp) -> Self {
        self.classified_at = at;
        self
    }
}

/// Repository port for classification persistence.
///
/// A subject may be classified many times; records are never overwritten.
#[async_trait]
pub trait ClassificationRepository: Send + Sync {
    /// Save a new classification record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &ClassificationRecord) -> Result<(), DomainError>;

    /// Find the most recent classification for a subject.
    ///
    /// Returns `None` if the subject has never been classified.
    async fn find_latest(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<ClassificationRecord>, DomainError>;

    /// List every classification for a subject, oldest first.
    async fn list_for_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<ClassificationRecord>, DomainError>;
}
