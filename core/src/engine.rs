// core/src/engine.rs
//
// Generic assessment engine that works with any language profile.
// Language crates supply normalization and phonetic analysis; the engine
// runs comparison, fluency, scoring and feedback the same way for all of them.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    AssessmentContext, AssessmentError, AssessmentRequest, AssessmentResult, Config,
    DetailedAnalysis, FeedbackGenerator, FluencyScores, NormalizedPair, PhoneticAnalysis,
    PhoneticsBreakdown, ScoringStrategy, SemanticClassification, SemanticValidator,
    StressAnalysis, TextComparison, WeightedInputs,
};

/// Trait that language profiles must implement to work with the generic Engine.
///
/// Implementations must not keep per-call state: one profile instance is
/// shared by every assessment, possibly from several threads.
pub trait LanguageProfile {
    /// Canonicalize a raw string for comparison (case, accents, punctuation,
    /// whitespace).
    fn normalize(&self, text: &str) -> String;

    /// Vowel/consonant/diphthong correspondence and categorized errors.
    fn analyze_phonetics(&self, pair: &NormalizedPair) -> PhoneticAnalysis;

    /// Syllable count, stress class and stress accuracy of the target.
    fn analyze_stress(&self, pair: &NormalizedPair, exact_match: bool) -> StressAnalysis;

    /// Educational decomposition of the target word.
    fn breakdown(&self, target: &str) -> PhoneticsBreakdown;
}

/// Generic assessment engine.
///
/// Type parameter L is the language profile (e.g. `SpanishProfile`).
///
/// Holds only immutable configuration; `assess` takes `&self` and every
/// intermediate value is local to the call.
pub struct Engine<L> {
    config: Config,
    language: L,
    feedback: FeedbackGenerator,
    validator: Option<Arc<dyn SemanticValidator>>,
}

impl<L: LanguageProfile> Engine<L> {
    /// Create a new engine with the given config and language profile.
    pub fn new(config: Config, language: L) -> Self {
        let feedback = FeedbackGenerator::new(config.thresholds, config.max_suggestions);
        Self {
            config,
            language,
            feedback,
            validator: None,
        }
    }

    /// Consult `validator` on every `assess` call.
    pub fn with_validator(mut self, validator: Arc<dyn SemanticValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn language(&self) -> &L {
        &self.language
    }

    /// Assess one attempt, asking the configured validator (if any) for a
    /// semantic classification first.
    ///
    /// Never fails: internal errors and validator failures are logged and
    /// turned into a well-formed result.
    pub fn assess(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
    ) -> AssessmentResult {
        let classification = self.consult_validator(target, recognized, context);
        self.assess_with_classification(target, recognized, context, classification)
    }

    pub fn assess_request(&self, request: &AssessmentRequest) -> AssessmentResult {
        self.assess(&request.target, &request.recognized, &request.context)
    }

    /// Assess with an already-resolved classification (`None` selects the
    /// weighted regime).
    pub fn assess_with_classification(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
        classification: Option<SemanticClassification>,
    ) -> AssessmentResult {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.try_assess(target, recognized, context, classification)
        }));
        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "assessment failed");
                AssessmentResult::technical_error()
            }
            Err(_) => {
                warn!("assessment panicked");
                AssessmentResult::technical_error()
            }
        }
    }

    /// The assessment pipeline with errors exposed.
    ///
    /// 1. Normalize both strings
    /// 2. Compare text, analyze phonetics and stress, estimate fluency
    /// 3. Score with the selected strategy
    /// 4. Build feedback, suggestions and the optional breakdown
    pub fn try_assess(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
        classification: Option<SemanticClassification>,
    ) -> Result<AssessmentResult, AssessmentError> {
        let pair = NormalizedPair {
            target_original: target.to_string(),
            recognized_original: recognized.to_string(),
            target: self.language.normalize(target),
            recognized: self.language.normalize(recognized),
        };

        let text = TextComparison::compare(
            &pair.target,
            &pair.recognized,
            self.config.max_input_chars,
        )?;
        let target_empty = pair.target.is_empty();
        let exact_match = text.exact_match && !target_empty;

        let phonetic = self.language.analyze_phonetics(&pair);
        let stress = self.language.analyze_stress(&pair, exact_match);
        let fluency = FluencyScores::estimate(context);
        debug!(
            target = %pair.target,
            recognized = %pair.recognized,
            distance = text.distance,
            similarity = text.similarity,
            phonetic = phonetic.overall,
            findings = phonetic.findings.len(),
            stress = stress.accuracy,
            clarity = fluency.clarity,
            "analyzed attempt"
        );

        let inputs = WeightedInputs {
            text_similarity: text.similarity,
            phonetic_overall: phonetic.overall,
            stress_accuracy: stress.accuracy,
            fluency_clarity: fluency.clarity,
            exact_match,
            target_empty,
        };
        let strategy = ScoringStrategy::select(inputs, classification);
        let score = strategy.score(&self.config.weights, &self.config.thresholds);
        debug!(
            strategy = strategy.name(),
            accuracy = score.accuracy,
            correct = score.is_correct_for_srs,
            "scored attempt"
        );

        let feedback =
            self.feedback
                .feedback(&score, exact_match, strategy.classification(), context);
        let suggestions =
            self.feedback
                .suggestions(&phonetic.findings, &fluency, strategy.classification());
        let phonetics_breakdown = if self.config.include_breakdown {
            Some(self.language.breakdown(target))
        } else {
            None
        };

        Ok(AssessmentResult {
            accuracy: score.accuracy,
            is_correct_for_srs: score.is_correct_for_srs,
            feedback,
            suggestions,
            detailed_analysis: Some(DetailedAnalysis {
                strategy: strategy.name().to_string(),
                semantic_type: strategy.classification().map(|c| c.kind),
                text,
                phonetic,
                stress,
                fluency,
            }),
            phonetics_breakdown,
        })
    }

    /// Remediation suggestions for a target/transcript pair, without scoring.
    pub fn educational_suggestions(&self, target: &str, recognized: &str) -> Vec<String> {
        let pair = NormalizedPair {
            target_original: target.to_string(),
            recognized_original: recognized.to_string(),
            target: self.language.normalize(target),
            recognized: self.language.normalize(recognized),
        };
        let phonetic = self.language.analyze_phonetics(&pair);
        let fluency = FluencyScores::estimate(&AssessmentContext::default());
        self.feedback.suggestions(&phonetic.findings, &fluency, None)
    }

    pub fn breakdown(&self, target: &str) -> PhoneticsBreakdown {
        self.language.breakdown(target)
    }

    fn consult_validator(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
    ) -> Option<SemanticClassification> {
        let validator = self.validator.as_ref()?;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            validator.validate(target, recognized, context)
        }));
        match outcome {
            Ok(Ok(c)) if c.pedagogical_score.is_finite() => Some(c),
            Ok(Ok(c)) => {
                warn!(score = c.pedagogical_score, "validator returned a non-finite score");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "semantic validator failed, falling back to weighted scoring");
                None
            }
            Err(_) => {
                warn!("semantic validator panicked, falling back to weighted scoring");
                None
            }
        }
    }
}
