//! Composite scorer.
//!
//! Two regimes are selected per call:
//! - `SemanticAnchored` when the external validator supplied a classification:
//!   its pedagogical score *is* the accuracy.
//! - `Weighted` otherwise: a fixed blend of text similarity, phonetics, stress
//!   and clarity, overridden by a literal match.
//!
//! Both gate spaced-repetition progress on `Thresholds::passing`.

use serde::{Deserialize, Serialize};

use crate::utils::clamp_score;
use crate::{ScoringWeights, SemanticClassification, Thresholds};

/// Sub-scores feeding the weighted blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeightedInputs {
    pub text_similarity: u8,
    pub phonetic_overall: u8,
    pub stress_accuracy: u8,
    pub fluency_clarity: u8,
    pub exact_match: bool,
    /// Nothing was asked for; there is nothing to get right
    pub target_empty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringStrategy {
    Weighted(WeightedInputs),
    SemanticAnchored(SemanticClassification),
}

/// Accuracy plus the strict pass/fail decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub accuracy: u8,
    pub is_correct_for_srs: bool,
}

impl ScoringStrategy {
    /// Prefer the semantic verdict when one is available.
    pub fn select(inputs: WeightedInputs, classification: Option<SemanticClassification>) -> Self {
        match classification {
            Some(c) => ScoringStrategy::SemanticAnchored(c),
            None => ScoringStrategy::Weighted(inputs),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoringStrategy::Weighted(_) => "weighted",
            ScoringStrategy::SemanticAnchored(_) => "semantic_anchored",
        }
    }

    pub fn classification(&self) -> Option<&SemanticClassification> {
        match self {
            ScoringStrategy::SemanticAnchored(c) => Some(c),
            ScoringStrategy::Weighted(_) => None,
        }
    }

    pub fn score(&self, weights: &ScoringWeights, thresholds: &Thresholds) -> CompositeScore {
        match self {
            ScoringStrategy::SemanticAnchored(c) => semantic_score(c.pedagogical_score, thresholds),
            ScoringStrategy::Weighted(inputs) => {
                let accuracy = weighted_accuracy(inputs, weights);
                CompositeScore {
                    accuracy,
                    is_correct_for_srs: thresholds.passes(accuracy),
                }
            }
        }
    }
}

/// The gate sees the unrounded score, so 89.5 fails. Accuracy is floored to
/// keep it below the threshold whenever the gate does.
fn semantic_score(raw: f64, thresholds: &Thresholds) -> CompositeScore {
    let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 100.0) };
    CompositeScore {
        accuracy: raw.floor() as u8,
        is_correct_for_srs: raw >= thresholds.passing as f64,
    }
}

fn weighted_accuracy(inputs: &WeightedInputs, weights: &ScoringWeights) -> u8 {
    if inputs.target_empty {
        return 0;
    }
    // Sub-heuristics are noisy and must never contradict a literal match.
    if inputs.exact_match {
        return weights.exact_match_score.min(100);
    }
    let blend = inputs.text_similarity as f64 * weights.text_similarity as f64
        + inputs.phonetic_overall as f64 * weights.phonetic as f64
        + inputs.stress_accuracy as f64 * weights.stress as f64
        + inputs.fluency_clarity as f64 * weights.fluency as f64;
    clamp_score(blend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SemanticType;

    fn inputs(sim: u8, phon: u8, stress: u8, clarity: u8) -> WeightedInputs {
        WeightedInputs {
            text_similarity: sim,
            phonetic_overall: phon,
            stress_accuracy: stress,
            fluency_clarity: clarity,
            exact_match: false,
            target_empty: false,
        }
    }

    #[test]
    fn weighted_blend() {
        let s = ScoringStrategy::Weighted(inputs(80, 70, 75, 100))
            .score(&ScoringWeights::default(), &Thresholds::default());
        // 32 + 21 + 15 + 10
        assert_eq!(s.accuracy, 78);
        assert!(!s.is_correct_for_srs);
    }

    #[test]
    fn exact_match_overrides_blend() {
        let mut i = inputs(100, 100, 75, 0);
        i.exact_match = true;
        let strict = ScoringStrategy::Weighted(i)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(strict.accuracy, 100);
        assert!(strict.is_correct_for_srs);

        let legacy =
            ScoringStrategy::Weighted(i).score(&ScoringWeights::legacy(), &Thresholds::default());
        assert_eq!(legacy.accuracy, 95);
        assert!(legacy.is_correct_for_srs);
    }

    #[test]
    fn empty_target_scores_zero() {
        let mut i = inputs(100, 100, 100, 100);
        i.exact_match = true;
        i.target_empty = true;
        let s = ScoringStrategy::Weighted(i)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 0);
        assert!(!s.is_correct_for_srs);
    }

    #[test]
    fn semantic_score_governs() {
        let c = SemanticClassification::new(SemanticType::AccentError, 85.0);
        let strategy = ScoringStrategy::select(inputs(100, 100, 100, 100), Some(c));
        assert_eq!(strategy.name(), "semantic_anchored");
        let s = strategy.score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 85);
        assert!(!s.is_correct_for_srs);
    }

    #[test]
    fn passing_gate_is_inclusive() {
        let c = SemanticClassification::new(SemanticType::ValidConjugation, 90.0);
        let s = ScoringStrategy::SemanticAnchored(c)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert!(s.is_correct_for_srs);
    }

    #[test]
    fn alternate_thresholds_change_the_gate() {
        let lenient = Thresholds {
            passing: 80,
            ..Thresholds::default()
        };
        let s = ScoringStrategy::Weighted(inputs(80, 80, 75, 100))
            .score(&ScoringWeights::default(), &lenient);
        // 32 + 24 + 15 + 10
        assert_eq!(s.accuracy, 81);
        assert!(s.is_correct_for_srs);
    }

    #[test]
    fn out_of_range_semantic_score_is_clamped() {
        let c = SemanticClassification::new(SemanticType::ExactMatch, 140.0);
        let s = ScoringStrategy::SemanticAnchored(c)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 100);
    }

    #[test]
    fn fractional_score_below_threshold_fails() {
        let c = SemanticClassification::new(SemanticType::AccentError, 89.5);
        let s = ScoringStrategy::SemanticAnchored(c)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 89);
        assert!(!s.is_correct_for_srs);

        let c = SemanticClassification::new(SemanticType::ValidConjugation, 90.4);
        let s = ScoringStrategy::SemanticAnchored(c)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 90);
        assert!(s.is_correct_for_srs);
    }

    #[test]
    fn nan_semantic_score_fails() {
        let c = SemanticClassification::new(SemanticType::IncorrectWord, f64::NAN);
        let s = ScoringStrategy::SemanticAnchored(c)
            .score(&ScoringWeights::default(), &Thresholds::default());
        assert_eq!(s.accuracy, 0);
        assert!(!s.is_correct_for_srs);
    }
}
