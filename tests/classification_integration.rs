//! Integration tests for persona classification.
//!
//! These tests drive the public API end-to-end:
//! 1. Questions and responses are decoded from the JSON layout the CLI accepts
//! 2. ClassifySubjectHandler classifies and persists through the repository port
//! 3. GetClassificationHandler reads the latest result back
//!
//! Property tests cover the aggregate invariants over random questionnaires.

use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

use persona_rubric::adapters::InMemoryClassificationRepository;
use persona_rubric::application::{
    ClassifySubjectCommand, ClassifySubjectHandler, GetClassificationHandler,
    GetClassificationQuery,
};
use persona_rubric::domain::foundation::{ErrorCode, QuestionId, SubjectId};
use persona_rubric::domain::persona::{
    ClassificationError, PersonaClassifier, PersonaComposition, PersonaQuestion, PersonaType,
    QuestionOption, QuestionResponse, QuestionWeight, RarityLevel,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn questionnaire_json() -> serde_json::Value {
    json!({
        "questions": [
            {
                "id": 1,
                "text": "Quando precisa decidir algo importante, você:",
                "weight": 1,
                "kind": "multiple_choice",
                "options": [
                    { "value": "a", "label": "Levanto dados", "persona": "ANALITICO" },
                    { "value": "b", "label": "Resolvo logo", "persona": "PRAGMATICO" },
                    { "value": "c", "label": "Imagino alternativas", "persona": "CRIATIVO" },
                    { "value": "e", "label": "Converso com as pessoas", "persona": "EMOTIVO" }
                ]
            },
            {
                "id": 2,
                "text": "Conte como você tomou sua última grande decisão",
                "weight": 2,
                "kind": "open_ended"
            }
        ],
        "responses": [
            { "question_id": 1, "answer": "b" },
            {
                "question_id": 2,
                "answer": "Eu analiso os dados, comparo critérios e sigo um processo estruturado"
            }
        ]
    })
}

fn decode(value: serde_json::Value) -> (Vec<PersonaQuestion>, Vec<QuestionResponse>) {
    let questions = serde_json::from_value(value["questions"].clone()).unwrap();
    let responses = serde_json::from_value(value["responses"].clone()).unwrap();
    (questions, responses)
}

fn choice_question(id: u32, weight: QuestionWeight) -> PersonaQuestion {
    PersonaQuestion::multiple_choice(
        QuestionId::new(id),
        "Qual frase combina mais com você?",
        weight,
        vec![
            QuestionOption::tagged("a", "Prefiro planilhas", PersonaType::Analitico),
            QuestionOption::tagged("b", "Prefiro agir", PersonaType::Pragmatico),
            QuestionOption::tagged("c", "Prefiro inventar", PersonaType::Criativo),
            QuestionOption::tagged("e", "Prefiro sentir", PersonaType::Emotivo),
            QuestionOption::tagged("i", "Prefiro esperar", PersonaType::Inseguro),
        ],
    )
    .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn weighted_analytic_text_beats_tagged_pragmatic_choice() {
    let (questions, responses) = decode(questionnaire_json());
    let classifier = PersonaClassifier::with_embedded_rubric();

    let result = classifier.aggregate(&questions, &responses).unwrap();

    assert!((result.score(PersonaType::Pragmatico) - 0.9).abs() < 1e-9);
    assert!((result.score(PersonaType::Analitico) - 2.0).abs() < 1e-9);
    assert_eq!(result.persona_type, PersonaType::Analitico);
    assert_eq!(result.dominant_personas, vec![PersonaType::Analitico]);
    assert_eq!(result.persona_composition, PersonaComposition::Pure);
    assert_eq!(result.combination_key, "analitico");
    assert_eq!(result.population_percentage, 12.0);
    assert_eq!(result.rarity_level, RarityLevel::VeryCommon);
    assert!(!result.description.is_empty());
    assert_eq!(result.response_analyses.len(), 2);
}

#[test]
fn evenly_split_answers_are_a_dual_combination() {
    let questions = vec![
        choice_question(1, QuestionWeight::Standard),
        choice_question(2, QuestionWeight::Standard),
    ];
    let responses = vec![
        QuestionResponse::new(QuestionId::new(1), "c"),
        QuestionResponse::new(QuestionId::new(2), "e"),
    ];

    let result = PersonaClassifier::with_embedded_rubric()
        .aggregate(&questions, &responses)
        .unwrap();

    assert_eq!(
        result.dominant_personas,
        vec![PersonaType::Emotivo, PersonaType::Criativo]
    );
    assert_eq!(result.persona_composition, PersonaComposition::Dual);
    assert_eq!(result.combination_key, "criativo-emotivo");
    assert_eq!(result.population_percentage, 6.0);
    assert_eq!(result.rarity_level, RarityLevel::Common);
}

#[test]
fn unknown_combination_uses_default_entry() {
    let questions: Vec<_> = (1..=4)
        .map(|id| choice_question(id, QuestionWeight::Standard))
        .collect();
    let responses: Vec<_> = ["a", "b", "c", "e"]
        .iter()
        .enumerate()
        .map(|(i, answer)| QuestionResponse::new(QuestionId::new(i as u32 + 1), *answer))
        .collect();

    let result = PersonaClassifier::with_embedded_rubric()
        .aggregate(&questions, &responses)
        .unwrap();

    assert_eq!(result.persona_composition, PersonaComposition::Complex);
    assert_eq!(result.combination_key, "analitico-criativo-emotivo-pragmatico");
    assert_eq!(result.population_percentage, 0.1);
    assert_eq!(result.rarity_level, RarityLevel::ExtremelyRare);
    assert_eq!(
        result.persona_display_name,
        "Analítico + Emotivo + Pragmático + Criativo"
    );
}

#[test]
fn missing_response_produces_no_result() {
    let (questions, mut responses) = decode(questionnaire_json());
    responses.retain(|r| r.question_id != QuestionId::new(2));

    let err = PersonaClassifier::with_embedded_rubric()
        .aggregate(&questions, &responses)
        .unwrap_err();

    assert_eq!(
        err,
        ClassificationError::MissingResponse {
            question_id: QuestionId::new(2)
        }
    );
}

// =============================================================================
// Handler + Repository Flow
// =============================================================================

#[tokio::test]
async fn classify_then_query_latest() {
    let (questions, responses) = decode(questionnaire_json());
    let repository = Arc::new(InMemoryClassificationRepository::new());
    let classifier = Arc::new(PersonaClassifier::with_embedded_rubric());
    let subject_id = SubjectId::new("ana").unwrap();

    let classify = ClassifySubjectHandler::new(classifier, repository.clone());
    let outcome = classify
        .handle(ClassifySubjectCommand {
            subject_id: subject_id.clone(),
            questions,
            responses,
        })
        .await
        .unwrap();

    let query = GetClassificationHandler::new(repository.clone());
    let record = query
        .handle(GetClassificationQuery { subject_id })
        .await
        .unwrap();

    assert_eq!(record.id, outcome.classification_id);
    assert_eq!(record.result, outcome.result);
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn failed_classification_is_not_persisted() {
    let (questions, _) = decode(questionnaire_json());
    let repository = Arc::new(InMemoryClassificationRepository::new());
    let classify = ClassifySubjectHandler::new(
        Arc::new(PersonaClassifier::with_embedded_rubric()),
        repository.clone(),
    );

    let err = classify
        .handle(ClassifySubjectCommand {
            subject_id: SubjectId::new("ana").unwrap(),
            questions,
            responses: vec![],
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingResponse);
    assert!(repository.is_empty().await);
}

// =============================================================================
// Properties
// =============================================================================

const ANSWER_WORDS: &[&str] = &[
    "dados", "analiso", "sinto", "coração", "rápido", "prático", "imagino", "ideia", "talvez",
    "não sei", "família", "1.", "2.", "?", "ou", "e se", "resultado", "medo", "criatividade",
    "eu", "meu", "minha", "processo", "xyz",
];

fn arb_answer() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ANSWER_WORDS), 0..12).prop_map(|w| w.join(" "))
}

fn arb_weight() -> impl Strategy<Value = QuestionWeight> {
    prop_oneof![
        Just(QuestionWeight::Standard),
        Just(QuestionWeight::Important),
        Just(QuestionWeight::Critical),
    ]
}

/// (is_choice, weight, answer) per question
fn arb_questionnaire() -> impl Strategy<Value = Vec<(bool, QuestionWeight, String)>> {
    let item = (
        any::<bool>(),
        arb_weight(),
        prop_oneof![
            prop::sample::select(vec!["a", "b", "c", "e", "i", "zz"]).prop_map(String::from),
            arb_answer(),
        ],
    );
    prop::collection::vec(item, 0..10)
}

fn build(items: &[(bool, QuestionWeight, String)]) -> (Vec<PersonaQuestion>, Vec<QuestionResponse>) {
    let mut questions = Vec::new();
    let mut responses = Vec::new();
    for (i, (is_choice, weight, answer)) in items.iter().enumerate() {
        let id = i as u32 + 1;
        let question = if *is_choice {
            choice_question(id, *weight)
        } else {
            PersonaQuestion::open_ended(QuestionId::new(id), "Fale sobre você", *weight).unwrap()
        };
        questions.push(question);
        responses.push(QuestionResponse::new(QuestionId::new(id), answer.clone()));
    }
    (questions, responses)
}

proptest! {
    #[test]
    fn aggregate_upholds_result_invariants(items in arb_questionnaire()) {
        let (questions, responses) = build(&items);
        let classifier = PersonaClassifier::with_embedded_rubric();

        let result = classifier.aggregate(&questions, &responses).unwrap();

        prop_assert_eq!(result.weighted_scores.len(), 5);
        prop_assert!(result.weighted_scores.values().all(|s| *s >= 0.0));
        prop_assert!(!result.dominant_personas.is_empty());
        prop_assert!(result.dominant_personas.len() <= 5);
        prop_assert_eq!(
            result.persona_composition,
            PersonaComposition::from_count(result.dominant_personas.len())
        );
        prop_assert_eq!(result.persona_type, result.dominant_personas[0]);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!(result.population_percentage > 0.0);
        prop_assert!(result
            .response_analyses
            .iter()
            .all(|r| r.analysis.confidence > 0.0 && r.analysis.confidence <= 1.0));
    }

    #[test]
    fn aggregate_is_idempotent(items in arb_questionnaire()) {
        let (questions, responses) = build(&items);
        let classifier = PersonaClassifier::with_embedded_rubric();

        let first = classifier.aggregate(&questions, &responses).unwrap();
        let second = classifier.aggregate(&questions, &responses).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn dropping_any_response_is_a_missing_response(
        items in arb_questionnaire().prop_filter("needs a question", |v| !v.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let (questions, mut responses) = build(&items);
        let removed = responses.remove(pick.index(responses.len()));

        let err = PersonaClassifier::with_embedded_rubric()
            .aggregate(&questions, &responses)
            .unwrap_err();

        prop_assert_eq!(
            err,
            ClassificationError::MissingResponse { question_id: removed.question_id }
        );
    }
}
