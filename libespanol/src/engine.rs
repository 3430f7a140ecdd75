//! Spanish assessment engine
//!
//! Thin wrapper around the generic `libpronuncia_core::Engine<SpanishProfile>`.
//! The profile supplies Spanish normalization, phonetic and stress analysis;
//! comparison, scoring and feedback live in core.

use std::sync::Arc;

use libpronuncia_core::{
    AssessmentContext, AssessmentError, AssessmentRequest, AssessmentResult, LanguageProfile,
    NormalizedPair, PhoneticAnalysis, PhoneticsBreakdown, SemanticClassification,
    SemanticValidator, StressAnalysis,
};

use crate::config::SpanishConfig;
use crate::phonetic::PhoneticAnalyzer;
use crate::{breakdown, normalizer, stress};

/// Spanish phonology plugged into the core pipeline.
#[derive(Debug, Clone, Default)]
pub struct SpanishProfile {
    analyzer: PhoneticAnalyzer,
}

impl SpanishProfile {
    pub fn new(config: &SpanishConfig) -> Self {
        Self {
            analyzer: PhoneticAnalyzer::new(
                config.confusion_table(),
                config.check_silent_letters,
                config.check_accents,
            ),
        }
    }

    pub fn analyzer(&self) -> &PhoneticAnalyzer {
        &self.analyzer
    }
}

impl LanguageProfile for SpanishProfile {
    fn normalize(&self, text: &str) -> String {
        normalizer::normalize(text)
    }

    fn analyze_phonetics(&self, pair: &NormalizedPair) -> PhoneticAnalysis {
        self.analyzer.analyze(pair)
    }

    fn analyze_stress(&self, pair: &NormalizedPair, exact_match: bool) -> StressAnalysis {
        stress::analyze(pair, exact_match)
    }

    fn breakdown(&self, target: &str) -> PhoneticsBreakdown {
        breakdown::build(target)
    }
}

/// Public engine for libespanol.
///
/// The inner engine is wrapped in Arc so clones share one immutable
/// configuration across threads.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<libpronuncia_core::Engine<SpanishProfile>>,
}

impl Engine {
    /// Construct an engine without validating `config`.
    pub fn new(config: SpanishConfig) -> Self {
        let profile = SpanishProfile::new(&config);
        Self {
            inner: Arc::new(libpronuncia_core::Engine::new(config.into_base(), profile)),
        }
    }

    /// Construct an engine after checking thresholds and weights.
    pub fn from_config(config: SpanishConfig) -> Result<Self, AssessmentError> {
        config.base().validate()?;
        Ok(Self::new(config))
    }

    /// Load an engine from a TOML configuration file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let config = SpanishConfig::load_toml(path)?;
        tracing::debug!(rules = config.confusions.len(), "loaded spanish config");
        Ok(Self::new(config))
    }

    /// Construct an engine that consults `validator` on every assessment.
    pub fn with_validator(config: SpanishConfig, validator: Arc<dyn SemanticValidator>) -> Self {
        let profile = SpanishProfile::new(&config);
        let inner =
            libpronuncia_core::Engine::new(config.into_base(), profile).with_validator(validator);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Get a cloned Arc to the inner core engine.
    pub fn inner_arc(&self) -> Arc<libpronuncia_core::Engine<SpanishProfile>> {
        Arc::clone(&self.inner)
    }

    pub fn config(&self) -> &libpronuncia_core::Config {
        self.inner.config()
    }

    /// Assess one spoken attempt at `target`. Never fails.
    pub fn assess(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
    ) -> AssessmentResult {
        self.inner.assess(target, recognized, context)
    }

    pub fn assess_request(&self, request: &AssessmentRequest) -> AssessmentResult {
        self.inner.assess_request(request)
    }

    /// Assess with a classification already obtained from the conjugation
    /// classifier.
    pub fn assess_with_classification(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
        classification: Option<SemanticClassification>,
    ) -> AssessmentResult {
        self.inner
            .assess_with_classification(target, recognized, context, classification)
    }

    /// Like `assess_with_classification`, but returns internal errors instead
    /// of the technical-error result.
    pub fn try_assess(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
        classification: Option<SemanticClassification>,
    ) -> Result<AssessmentResult, AssessmentError> {
        self.inner
            .try_assess(target, recognized, context, classification)
    }

    pub fn educational_suggestions(&self, target: &str, recognized: &str) -> Vec<String> {
        self.inner.educational_suggestions(target, recognized)
    }

    pub fn breakdown(&self, target: &str) -> PhoneticsBreakdown {
        self.inner.breakdown(target)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SpanishConfig::default())
    }
}
