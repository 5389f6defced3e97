//! GetClassificationHandler - Query handler for a subject's latest classification.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, SubjectId};
use crate::ports::{ClassificationRecord, ClassificationRepository};

/// Query for the most recent classification of a subject.
#[derive(Debug, Clone)]
pub struct GetClassificationQuery {
    pub subject_id: SubjectId,
}

/// Handler for retrieving classifications.
///
/// Unlike a plain lookup, an unclassified subject is an error
/// (`ClassificationNotFound`) so callers can surface it directly.
pub struct GetClassificationHandler {
    repository: Arc<dyn ClassificationRepository>,
}

impl GetClassificationHandler {
    pub fn new(repository: Arc<dyn ClassificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetClassificationQuery,
    ) -> Result<ClassificationRecord, DomainError> {
        self.repository
            .find_latest(&query.subject_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ClassificationNotFound,
                    format!("Subject {} has not been classified", query.subject_id),
                )
                .with_detail("subject_id", query.subject_id.to_string())
            })
    }
}

/// Query for every classification of a subject, oldest first.
#[derive(Debug, Clone)]
pub struct ListClassificationsQuery {
    pub subject_id: SubjectId,
}

/// Handler for a subject's classification history.
pub struct ListClassificationsHandler {
    repository: Arc<dyn ClassificationRepository>,
}

impl ListClassificationsHandler {
    pub fn new(repository: Arc<dyn ClassificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListClassificationsQuery,
    ) -> Result<Vec<ClassificationRecord>, DomainError> {
        self.repository.list_for_subject(&query.subject_id).await
    }
}
