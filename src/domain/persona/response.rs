//! A subject's answer to one question.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{QuestionId, Timestamp};

use super::{PersonaType, TypingMetrics};

/// Per-archetype raw pattern scores derived from answer text (and typing, if present).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticAnalysis {
    /// Raw score per archetype; always holds all five entries
    pub raw_scores: BTreeMap<PersonaType, f64>,
    /// Which keywords, patterns and typing rules fired
    pub indicators: Vec<String>,
}

impl SemanticAnalysis {
    /// An analysis with every archetype at zero.
    pub fn empty() -> Self {
        Self {
            raw_scores: PersonaType::ALL.iter().map(|p| (*p, 0.0)).collect(),
            indicators: Vec::new(),
        }
    }

    pub fn add(&mut self, persona: PersonaType, amount: f64, indicator: String) {
        *self.raw_scores.entry(persona).or_insert(0.0) += amount;
        self.indicators.push(indicator);
    }

    pub fn score(&self, persona: PersonaType) -> f64 {
        self.raw_scores.get(&persona).copied().unwrap_or(0.0)
    }

    /// True when nothing matched.
    pub fn is_silent(&self) -> bool {
        self.raw_scores.values().all(|s| *s <= 0.0)
    }

    /// Archetypes with a positive score, highest first, ties in declaration order.
    pub fn ranked(&self) -> Vec<(PersonaType, f64)> {
        let mut ranked: Vec<(PersonaType, f64)> = self
            .raw_scores
            .iter()
            .filter(|(_, s)| **s > 0.0)
            .map(|(p, s)| (*p, *s))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

impl Default for SemanticAnalysis {
    fn default() -> Self {
        Self::empty()
    }
}

/// The answer to one question. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub question_id: QuestionId,
    /// Raw answer text, or the selected option value
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_analysis: Option<SemanticAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_metrics: Option<TypingMetrics>,
    #[serde(default)]
    pub submitted_at: Timestamp,
}

impl QuestionResponse {
    pub fn new(question_id: QuestionId, answer: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: answer.into(),
            semantic_analysis: None,
            typing_metrics: None,
            submitted_at: Timestamp::now(),
        }
    }

    pub fn with_typing_metrics(mut self, metrics: TypingMetrics) -> Self {
        self.typing_metrics = Some(metrics);
        self
    }

    pub fn with_semantic_analysis(mut self, analysis: SemanticAnalysis) -> Self {
        self.semantic_analysis = Some(analysis);
        self
    }

    pub fn submitted_at(mut self, at: Timestamp) -> Self {
        self.submitted_at = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_analysis_has_all_archetypes_at_zero() {
        let analysis = SemanticAnalysis::empty();
        assert_eq!(analysis.raw_scores.len(), 5);
        assert!(analysis.is_silent());
        assert!(analysis.ranked().is_empty());
    }

    #[test]
    fn ranked_orders_by_score_then_declaration() {
        let mut analysis = SemanticAnalysis::empty();
        analysis.add(PersonaType::Inseguro, 2.0, "keyword:talvez".into());
        analysis.add(PersonaType::Emotivo, 2.0, "keyword:sinto".into());
        analysis.add(PersonaType::Criativo, 3.0, "keyword:ideia".into());

        let ranked: Vec<PersonaType> = analysis.ranked().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            ranked,
            vec![PersonaType::Criativo, PersonaType::Emotivo, PersonaType::Inseguro]
        );
        assert_eq!(analysis.indicators.len(), 3);
    }

    #[test]
    fn response_deserializes_without_optional_fields() {
        let json = r#"{"question_id": 2, "answer": "b"}"#;
        let response: QuestionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.question_id, QuestionId::new(2));
        assert!(response.typing_metrics.is_none());
        assert!(response.semantic_analysis.is_none());
    }
}
