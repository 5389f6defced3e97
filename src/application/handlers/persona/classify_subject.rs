//! ClassifySubjectHandler - Command handler that classifies a subject's
//! questionnaire answers and records the outcome.

use std::sync::Arc;

use crate::domain::foundation::{ClassificationId, DomainError, SubjectId};
use crate::domain::persona::{
    PersonaClassificationResult, PersonaClassifier, PersonaQuestion, QuestionResponse,
};
use crate::ports::{ClassificationRecord, ClassificationRepository};

/// Command to classify one subject.
#[derive(Debug, Clone)]
pub struct ClassifySubjectCommand {
    pub subject_id: SubjectId,
    pub questions: Vec<PersonaQuestion>,
    pub responses: Vec<QuestionResponse>,
}

/// Result of a successful classification.
#[derive(Debug, Clone)]
pub struct ClassifySubjectResult {
    pub classification_id: ClassificationId,
    pub result: PersonaClassificationResult,
}

/// Handler for classifying subjects.
pub struct ClassifySubjectHandler {
    classifier: Arc<PersonaClassifier>,
    repository: Arc<dyn ClassificationRepository>,
}

impl ClassifySubjectHandler {
    pub fn new(
        classifier: Arc<PersonaClassifier>,
        repository: Arc<dyn ClassificationRepository>,
    ) -> Self {
        Self {
            classifier,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: ClassifySubjectCommand,
    ) -> Result<ClassifySubjectResult, DomainError> {
        // 1. Questions may come from untrusted JSON
        for question in &cmd.questions {
            question.validate().map_err(|e| {
                DomainError::from(e).with_detail("question_id", question.id.to_string())
            })?;
        }

        // 2. Classify
        let result = self.classifier.aggregate(&cmd.questions, &cmd.responses)?;

        // 3. Persist
        let record = ClassificationRecord::new(cmd.subject_id, result);
        self.repository.save(&record).await?;

        tracing::info!(
            subject_id = %record.subject_id,
            classification_id = %record.id,
            persona = record.result.persona_type.key(),
            combination = %record.result.combination_key,
            confidence = record.result.confidence,
            "Subject classified"
        );

        Ok(ClassifySubjectResult {
            classification_id: record.id,
            result: record.result,
        })
    }
}
