//! Confidence and dominance arithmetic shared by the classifier.

use std::collections::BTreeMap;

use super::{PersonaAnalysis, PersonaType, SemanticAnalysis};

/// Raw scores closer than this are treated as tied.
const RAW_TIE_EPSILON: f64 = 1e-9;

/// Converts per-archetype raw scores into a single signal.
///
/// Confidence is `min + (1 - min) * margin * evidence` where `margin` is the
/// top score's lead over the runner-up relative to the top score, and
/// `evidence` saturates once the top score reaches `saturation`.
pub(crate) fn analysis_from_semantics(
    semantics: &SemanticAnalysis,
    fallback: PersonaType,
    min_confidence: f64,
    saturation: f64,
) -> PersonaAnalysis {
    let ranked = semantics.ranked();
    let Some(&(top_persona, top)) = ranked.first() else {
        return PersonaAnalysis::new(fallback, min_confidence, vec!["no_signal".to_string()]);
    };

    let tied_with: Vec<PersonaType> = ranked
        .iter()
        .skip(1)
        .filter(|(_, score)| (top - score).abs() <= RAW_TIE_EPSILON)
        .map(|(persona, _)| *persona)
        .collect();

    let runner_up = ranked.get(1).map(|(_, score)| *score).unwrap_or(0.0);
    let margin = ((top - runner_up) / top).clamp(0.0, 1.0);
    let evidence = if saturation > 0.0 {
        (top / saturation).min(1.0)
    } else {
        1.0
    };
    let confidence = min_confidence + (1.0 - min_confidence) * margin * evidence;

    PersonaAnalysis::new(top_persona, confidence, semantics.indicators.clone()).with_ties(tied_with)
}

/// Archetypes whose weighted score is within `tolerance` (relative) of the maximum,
/// highest first, ties in declaration order. Never empty.
pub(crate) fn dominant_personas(
    weighted: &BTreeMap<PersonaType, f64>,
    tolerance: f64,
) -> Vec<PersonaType> {
    let max = weighted.values().copied().fold(0.0_f64, f64::max);
    let threshold = max * (1.0 - tolerance);

    let mut dominant: Vec<(PersonaType, f64)> = PersonaType::ALL
        .iter()
        .map(|p| (*p, weighted.get(p).copied().unwrap_or(0.0)))
        .filter(|(_, score)| *score >= threshold)
        .collect();
    dominant.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    dominant.into_iter().map(|(p, _)| p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semantics(scores: &[(PersonaType, f64)]) -> SemanticAnalysis {
        let mut analysis = SemanticAnalysis::empty();
        for (persona, score) in scores {
            analysis.add(*persona, *score, format!("test:{}", persona.key()));
        }
        analysis
    }

    #[test]
    fn silent_text_falls_back_at_min_confidence() {
        let analysis =
            analysis_from_semantics(&SemanticAnalysis::empty(), PersonaType::Inseguro, 0.3, 3.0);
        assert_eq!(analysis.persona_type, PersonaType::Inseguro);
        assert_eq!(analysis.confidence, 0.3);
        assert_eq!(analysis.indicators, vec!["no_signal".to_string()]);
    }

    #[test]
    fn saturated_unopposed_signal_is_fully_confident() {
        let analysis = analysis_from_semantics(
            &semantics(&[(PersonaType::Analitico, 6.0)]),
            PersonaType::Inseguro,
            0.3,
            3.0,
        );
        assert_eq!(analysis.persona_type, PersonaType::Analitico);
        assert!((analysis.confidence - 1.0).abs() < 1e-12);
        assert!(analysis.tied_with.is_empty());
    }

    #[test]
    fn weak_signal_is_scaled_by_evidence() {
        let analysis = analysis_from_semantics(
            &semantics(&[(PersonaType::Criativo, 1.0)]),
            PersonaType::Inseguro,
            0.3,
            3.0,
        );
        // 0.3 + 0.7 * 1.0 * (1/3)
        assert!((analysis.confidence - (0.3 + 0.7 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn contested_signal_is_scaled_by_margin() {
        let analysis = analysis_from_semantics(
            &semantics(&[(PersonaType::Emotivo, 4.0), (PersonaType::Inseguro, 3.0)]),
            PersonaType::Inseguro,
            0.3,
            3.0,
        );
        assert_eq!(analysis.persona_type, PersonaType::Emotivo);
        // margin 0.25, evidence 1.0
        assert!((analysis.confidence - (0.3 + 0.7 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn exact_tie_records_tied_archetypes() {
        let analysis = analysis_from_semantics(
            &semantics(&[(PersonaType::Criativo, 2.0), (PersonaType::Analitico, 2.0)]),
            PersonaType::Inseguro,
            0.3,
            3.0,
        );
        assert_eq!(analysis.persona_type, PersonaType::Analitico);
        assert_eq!(analysis.tied_with, vec![PersonaType::Criativo]);
        assert_eq!(analysis.confidence, 0.3);
    }

    #[test]
    fn dominant_within_tolerance() {
        let weighted: BTreeMap<PersonaType, f64> = [
            (PersonaType::Analitico, 2.0),
            (PersonaType::Emotivo, 1.97),
            (PersonaType::Pragmatico, 0.9),
            (PersonaType::Criativo, 0.0),
            (PersonaType::Inseguro, 0.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            dominant_personas(&weighted, 0.05),
            vec![PersonaType::Analitico, PersonaType::Emotivo]
        );
        assert_eq!(dominant_personas(&weighted, 0.0), vec![PersonaType::Analitico]);
    }

    #[test]
    fn all_zero_scores_make_everyone_dominant() {
        let weighted: BTreeMap<PersonaType, f64> =
            PersonaType::ALL.iter().map(|p| (*p, 0.0)).collect();
        assert_eq!(dominant_personas(&weighted, 0.05), PersonaType::ALL.to_vec());
    }

    #[test]
    fn equal_scores_break_ties_by_declaration_order() {
        let weighted: BTreeMap<PersonaType, f64> = [
            (PersonaType::Inseguro, 1.0),
            (PersonaType::Emotivo, 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            dominant_personas(&weighted, 0.05),
            vec![PersonaType::Emotivo, PersonaType::Inseguro]
        );
    }
}
