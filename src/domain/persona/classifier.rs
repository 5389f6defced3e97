//! PersonaClassifier - turns a subject's questionnaire answers into a
//! ranked archetype classification.
//!
//! # Algorithm
//!
//! 1. Every response is scored on its own ([`PersonaClassifier::score_response`]):
//!    tagged multiple-choice options are authoritative, free text goes
//!    through the rubric's keyword, structural and typing rules.
//! 2. Each analysis adds `weight × confidence` to its archetype (split evenly
//!    across raw-score ties).
//! 3. Archetypes within `tie_tolerance` of the top weighted score are
//!    dominant; their sorted key selects population share, rarity tier and
//!    narrative text from the rubric.
//!
//! The classifier is a pure function of its inputs and the rubric. It holds
//! no mutable state and may be shared across threads.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::domain::foundation::QuestionId;

use super::scorer::{analysis_from_semantics, dominant_personas};
use super::{
    ClassificationError, PersonaAnalysis, PersonaClassificationResult, PersonaComposition,
    PersonaQuestion, PersonaType, QuestionResponse, RarityLevel, ResponseAnalysis, Rubric,
    SemanticAnalysis,
};

/// Tunable constants of the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Relative distance from the top weighted score within which an archetype is dominant
    pub tie_tolerance: f64,
    /// Confidence assigned to a tagged multiple-choice option
    pub choice_confidence: f64,
    /// Confidence floor for free-text analyses, also used when nothing matches
    pub min_confidence: f64,
    /// Raw score at which text evidence counts as conclusive
    pub evidence_saturation: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            tie_tolerance: 0.05,
            choice_confidence: 0.9,
            min_confidence: 0.3,
            evidence_saturation: 3.0,
        }
    }
}

/// Rule-based persona classifier.
#[derive(Debug, Clone)]
pub struct PersonaClassifier {
    rubric: Arc<Rubric>,
    settings: ClassifierSettings,
}

impl PersonaClassifier {
    pub fn new(rubric: Arc<Rubric>, settings: ClassifierSettings) -> Self {
        Self { rubric, settings }
    }

    /// Classifier over the embedded rubric with default settings.
    pub fn with_embedded_rubric() -> Self {
        Self::new(Arc::new(Rubric::embedded().clone()), ClassifierSettings::default())
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Free-text semantic analysis of a response.
    pub fn semantic_analysis(&self, response: &QuestionResponse) -> SemanticAnalysis {
        self.rubric
            .analyze(&response.answer, response.typing_metrics.as_ref())
    }

    /// Returns a copy of the response with its semantic analysis attached.
    pub fn annotate(&self, response: &QuestionResponse) -> QuestionResponse {
        response
            .clone()
            .with_semantic_analysis(self.semantic_analysis(response))
    }

    /// Scores one response. Never fails: weak or empty input lowers confidence.
    pub fn score_response(
        &self,
        question: &PersonaQuestion,
        response: &QuestionResponse,
    ) -> PersonaAnalysis {
        if !question.is_open_ended() {
            match question.find_option(&response.answer) {
                Some(option) => {
                    if let Some(persona) = option.persona {
                        return PersonaAnalysis::new(
                            persona,
                            self.settings.choice_confidence,
                            vec![format!("option:{}", option.value)],
                        );
                    }
                    // Untagged option: score the label the subject picked.
                    let semantics = self
                        .rubric
                        .analyze(&option.label, response.typing_metrics.as_ref());
                    return self.from_semantics(&semantics);
                }
                None => {
                    tracing::warn!(
                        question_id = %question.id,
                        "Answer does not match any option; scoring it as free text"
                    );
                }
            }
        }

        self.from_semantics(&self.semantic_analysis(response))
    }

    fn from_semantics(&self, semantics: &SemanticAnalysis) -> PersonaAnalysis {
        analysis_from_semantics(
            semantics,
            self.rubric.fallback_persona(),
            self.settings.min_confidence,
            self.settings.evidence_saturation,
        )
    }

    /// Aggregates every response of one subject into a classification.
    ///
    /// # Errors
    ///
    /// Fails without producing a partial result when a question has no
    /// response or more than one. Responses to questions not in `questions`
    /// are ignored.
    pub fn aggregate(
        &self,
        questions: &[PersonaQuestion],
        responses: &[QuestionResponse],
    ) -> Result<PersonaClassificationResult, ClassificationError> {
        let by_question = index_responses(questions, responses)?;

        let mut weighted: BTreeMap<PersonaType, f64> =
            PersonaType::ALL.iter().map(|p| (*p, 0.0)).collect();
        let mut response_analyses = Vec::with_capacity(questions.len());

        for question in questions {
            let response = by_question
                .get(&question.id)
                .ok_or(ClassificationError::MissingResponse {
                    question_id: question.id,
                })?;

            let analysis = self.score_response(question, response);
            let signaled = analysis.signaled();
            let share = question.weight.multiplier() * analysis.confidence / signaled.len() as f64;
            for persona in &signaled {
                *weighted.entry(*persona).or_insert(0.0) += share;
            }

            tracing::debug!(
                question_id = %question.id,
                persona = %persona_keys(&signaled),
                confidence = analysis.confidence,
                "Scored response"
            );

            response_analyses.push(ResponseAnalysis {
                question_id: question.id,
                weight: question.weight,
                analysis,
            });
        }

        let dominant = dominant_personas(&weighted, self.settings.tie_tolerance);
        let primary = dominant[0];
        let composition = PersonaComposition::from_count(dominant.len());
        let combination_key = PersonaType::combination_key(&dominant);

        let (population_percentage, rarity_level) =
            match self.rubric.population_percentage(&combination_key) {
                Some(percentage) => (percentage, RarityLevel::from_percentage(percentage)),
                None => (self.rubric.default_percentage(), RarityLevel::ExtremelyRare),
            };

        let total: f64 = weighted.values().sum();
        let confidence = if total > 0.0 {
            (weighted.get(&primary).copied().unwrap_or(0.0) / total).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let display_name = if dominant.len() == 1 || self.rubric.has_narrative(&combination_key) {
            self.rubric
                .narrative_for(&combination_key, primary)
                .map(|n| n.display_name.clone())
                .unwrap_or_else(|| primary.display_name().to_string())
        } else {
            dominant
                .iter()
                .map(|p| p.display_name())
                .collect::<Vec<_>>()
                .join(" + ")
        };

        let narrative = self.rubric.narrative_for(&combination_key, primary);
        let description = narrative.map(|n| n.description.clone()).unwrap_or_default();
        let business_impact = narrative
            .map(|n| n.business_impact.clone())
            .unwrap_or_default();
        let transformation_potential = narrative
            .map(|n| n.transformation_potential.clone())
            .unwrap_or_default();

        Ok(PersonaClassificationResult {
            persona_type: primary,
            persona_display_name: display_name,
            confidence,
            description,
            weighted_scores: weighted,
            dominant_personas: dominant,
            persona_composition: composition,
            combination_key,
            population_percentage,
            rarity_level,
            business_impact,
            transformation_potential,
            rubric_version: self.rubric.version().to_string(),
            response_analyses,
        })
    }
}

fn index_responses<'a>(
    questions: &[PersonaQuestion],
    responses: &'a [QuestionResponse],
) -> Result<HashMap<QuestionId, &'a QuestionResponse>, ClassificationError> {
    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if !seen.insert(question.id) {
            return Err(ClassificationError::DuplicateQuestion {
                question_id: question.id,
            });
        }
    }

    let mut by_question = HashMap::with_capacity(responses.len());
    for response in responses {
        if !questions.iter().any(|q| q.id == response.question_id) {
            tracing::debug!(
                question_id = %response.question_id,
                "Ignoring response to unknown question"
            );
            continue;
        }
        if by_question.insert(response.question_id, response).is_some() {
            return Err(ClassificationError::DuplicateResponse {
                question_id: response.question_id,
            });
        }
    }

    for question in questions {
        if !by_question.contains_key(&question.id) {
            return Err(ClassificationError::MissingResponse {
                question_id: question.id,
            });
        }
    }
    Ok(by_question)
}

fn persona_keys(personas: &[PersonaType]) -> String {
    personas
        .iter()
        .map(|p| p.key())
        .collect::<Vec<_>>()
        .join(",")
}
