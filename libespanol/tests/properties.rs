//! Property-based tests for assessment guarantees.
//!
//! For any target/transcript pair the engine must:
//! 1. Be a pure function of its arguments
//! 2. Never score a literal match below 95, and always pass it
//! 3. Gate on the governing score: correct iff score >= 90
//! 4. Never return an empty suggestion list

use proptest::prelude::*;

use libespanol::{AssessmentContext, Engine, SemanticClassification, SemanticType};
use libpronuncia_core::feedback::ENCOURAGEMENT;

// =============================================================================
// Strategy helpers
// =============================================================================

/// Lowercase Spanish words, optionally accented, with an optional second word.
fn spanish_phrase() -> impl Strategy<Value = String> {
    "[a-zñáéíóúü]{1,10}( [a-zñ]{1,8})?"
}

/// Anything a recognizer might hand back, including punctuation and case.
fn transcript() -> impl Strategy<Value = String> {
    "[a-zA-ZñÑáéíóú¿?¡!., ]{0,20}"
}

fn context_strategy() -> impl Strategy<Value = AssessmentContext> {
    (0.0f32..=1.0, 0u64..10_000)
        .prop_map(|(confidence, timing_ms)| AssessmentContext::with_measurements(confidence, timing_ms))
}

fn semantic_type() -> impl Strategy<Value = SemanticType> {
    prop_oneof![
        Just(SemanticType::ExactMatch),
        Just(SemanticType::ValidConjugation),
        Just(SemanticType::AccentError),
        Just(SemanticType::MinorPronunciation),
        Just(SemanticType::WrongContext),
        Just(SemanticType::DifferentVerb),
        Just(SemanticType::IncorrectWord),
    ]
}

fn classification() -> impl Strategy<Value = Option<SemanticClassification>> {
    prop::option::of(
        (semantic_type(), -50.0f64..150.0)
            .prop_map(|(kind, score)| SemanticClassification::new(kind, score)),
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn assess_is_idempotent(t in spanish_phrase(), r in transcript(), ctx in context_strategy()) {
        let engine = Engine::default();
        let first = engine.assess(&t, &r, &ctx);
        let second = engine.assess(&t, &r, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn literal_match_is_never_below_floor(t in spanish_phrase(), ctx in context_strategy()) {
        let engine = Engine::default();
        let result = engine.assess(&t, &t, &ctx);
        prop_assert!(result.accuracy >= 95, "accuracy {} for {:?}", result.accuracy, t);
        prop_assert!(result.is_correct_for_srs);
    }

    #[test]
    fn gate_agrees_with_governing_score(
        t in spanish_phrase(),
        r in transcript(),
        ctx in context_strategy(),
        verdict in classification(),
    ) {
        let engine = Engine::default();
        let governing = verdict
            .as_ref()
            .map(|c| c.pedagogical_score.clamp(0.0, 100.0));
        let result = engine.assess_with_classification(&t, &r, &ctx, verdict);

        prop_assert!(!result.is_technical_error());
        if let Some(score) = governing {
            prop_assert_eq!(result.accuracy, score.floor() as u8);
            prop_assert_eq!(result.is_correct_for_srs, score >= 90.0);
        }
        prop_assert_eq!(result.is_correct_for_srs, result.accuracy >= 90);
    }

    #[test]
    fn suggestions_never_empty(t in transcript(), r in transcript(), ctx in context_strategy()) {
        let engine = Engine::default();
        let result = engine.assess(&t, &r, &ctx);
        prop_assert!(!result.suggestions.is_empty());
        prop_assert!(result.suggestions.len() <= engine.config().max_suggestions);
        prop_assert!(result.suggestions.iter().all(|s| !s.is_empty()));
        if result.findings().is_empty() {
            prop_assert!(result.suggestions.iter().any(|s| s == ENCOURAGEMENT));
        }
    }
}
