//! In-Memory Classification Repository
//!
//! Keeps classification history per subject in insertion order.
//! Useful for testing, the CLI and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SubjectId};
use crate::ports::{ClassificationRecord, ClassificationRepository};

/// In-memory storage for classification records
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassificationRepository {
    records: Arc<RwLock<HashMap<SubjectId, Vec<ClassificationRecord>>>>,
}

impl InMemoryClassificationRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across all subjects
    pub async fn len(&self) -> usize {
        self.records.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl ClassificationRepository for InMemoryClassificationRepository {
    async fn save(&self, record: &ClassificationRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records
            .entry(record.subject_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn find_latest(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<ClassificationRecord>, DomainError> {
        let records = self.records.read().await;
        // Later saves win when two records share a timestamp
        Ok(records.get(subject_id).and_then(|history| {
            history
                .iter()
                .enumerate()
                .max_by_key(|(index, record)| (record.classified_at, *index))
                .map(|(_, record)| record.clone())
        }))
    }

    async fn list_for_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<ClassificationRecord>, DomainError> {
        let records = self.records.read().await;
        let mut history = records.get(subject_id).cloned().unwrap_or_default();
        history.sort_by_key(|record| record.classified_at);
        Ok(history)
    }
}
