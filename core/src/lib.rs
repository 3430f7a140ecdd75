//! libpronuncia-core
//!
//! Language-agnostic pronunciation assessment shared by language crates
//! (libespanol).
//!
//! The core owns everything that does not depend on the phonology of a
//! particular language: edit distance, fluency sub-scores, the composite
//! scorer, feedback text and the generic assessment pipeline. Language crates
//! plug in normalization and phonetic analysis through `LanguageProfile`.
//!
//! Public API:
//! - `Engine` - Runs one assessment per call over a `LanguageProfile`
//! - `AssessmentResult` - The sole externally visible artifact of an assessment
//! - `ScoringStrategy` - Weighted (legacy) vs. semantic-anchored scoring
//! - `SemanticValidator` - Boundary trait for the external conjugation classifier
//! - `Config` - Thresholds, weights and limits
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::AssessmentError;

pub mod context;
pub use context::{AssessmentContext, AssessmentRequest, RecognitionResult};

pub mod distance;
pub use distance::{levenshtein, similarity_percent, TextComparison};

pub mod fluency;
pub use fluency::FluencyScores;

pub mod finding;
pub use finding::{ErrorFinding, ErrorKind, Severity};

pub mod semantic;
pub use semantic::{SemanticClassification, SemanticType, SemanticValidator};

pub mod analysis;
pub use analysis::{
    DifficultyElement, NormalizedPair, PhoneticAnalysis, PhoneticsBreakdown, StressAnalysis,
    StressClass,
};

pub mod scorer;
pub use scorer::{CompositeScore, ScoringStrategy, WeightedInputs};

pub mod feedback;
pub use feedback::FeedbackGenerator;

pub mod result;
pub use result::{AssessmentResult, DetailedAnalysis};

pub mod engine;
pub use engine::{Engine, LanguageProfile};

/// Score thresholds used by the composite scorer and the feedback ladder.
///
/// Passed by value into the engine at construction so tests can substitute
/// alternate sets. `passing` is the strict spaced-repetition gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    pub perfect: u8,
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
    pub poor: u8,
    pub passing: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            perfect: 100,
            excellent: 90,
            good: 75,
            fair: 60,
            poor: 40,
            passing: 90,
        }
    }
}

impl Thresholds {
    /// Whether `score` clears the spaced-repetition gate.
    pub fn passes(&self, score: u8) -> bool {
        score >= self.passing
    }
}

/// Blend weights of the legacy weighted regime.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub text_similarity: f32,
    pub phonetic: f32,
    pub stress: f32,
    pub fluency: f32,
    /// Score reported for a literal (normalized) match instead of the blend.
    /// 100 on the strict path, 95 on the pure legacy path.
    pub exact_match_score: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            text_similarity: 0.4,
            phonetic: 0.3,
            stress: 0.2,
            fluency: 0.1,
            exact_match_score: 100,
        }
    }
}

impl ScoringWeights {
    /// Weights of the original weighted path, which caps exact matches at 95.
    pub fn legacy() -> Self {
        Self {
            exact_match_score: 95,
            ..Self::default()
        }
    }
}

/// Generic configuration for assessment.
///
/// Language-specific options (confusion tables, silent-letter checks) belong
/// in the language crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub thresholds: Thresholds,
    pub weights: ScoringWeights,

    /// Maximum number of suggestions returned to the learner.
    pub max_suggestions: usize,

    /// Inputs longer than this many characters are rejected as an internal
    /// error. Bounds the edit-distance matrix.
    pub max_input_chars: usize,

    /// Attach the phonetics breakdown of the target to every result.
    pub include_breakdown: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            weights: ScoringWeights::default(),
            max_suggestions: 4,
            max_input_chars: 256,
            include_breakdown: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check that weights and thresholds describe a usable scorer.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        let w = &self.weights;
        for (name, value) in [
            ("text_similarity", w.text_similarity),
            ("phonetic", w.phonetic),
            ("stress", w.stress),
            ("fluency", w.fluency),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AssessmentError::InvalidConfig(format!(
                    "weight {} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if w.exact_match_score > 100 {
            return Err(AssessmentError::InvalidConfig(format!(
                "exact_match_score must be <= 100, got {}",
                w.exact_match_score
            )));
        }

        let t = &self.thresholds;
        let ordered = t.poor <= t.fair
            && t.fair <= t.good
            && t.good <= t.excellent
            && t.excellent <= t.perfect
            && t.perfect <= 100;
        if !ordered {
            return Err(AssessmentError::InvalidConfig(format!(
                "thresholds must satisfy poor <= fair <= good <= excellent <= perfect <= 100: {:?}",
                t
            )));
        }
        if t.passing > 100 {
            return Err(AssessmentError::InvalidConfig(format!(
                "passing threshold must be <= 100, got {}",
                t.passing
            )));
        }
        if self.max_suggestions == 0 {
            return Err(AssessmentError::InvalidConfig(
                "max_suggestions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    ///
    /// Recognizers and keyboards disagree on composed vs. decomposed accents;
    /// every comparison starts from the composed form.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Collapse runs of whitespace into single spaces and trim the ends.
    pub fn collapse_whitespace(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Round a score and clamp it into `0..=100`.
    pub fn clamp_score(value: f64) -> u8 {
        if value.is_nan() {
            return 0;
        }
        value.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.thresholds.passing, 90);
        assert_eq!(cfg.max_suggestions, 4);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str(
            r#"
            max_suggestions = 2

            [thresholds]
            passing = 80
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.max_suggestions, 2);
        assert_eq!(cfg.thresholds.passing, 80);
        assert_eq!(cfg.thresholds.good, 75);
        assert_eq!(cfg.weights, ScoringWeights::default());
    }

    #[test]
    fn toml_round_trip_preserves_config() {
        let mut cfg = Config::default();
        cfg.weights = ScoringWeights::legacy();
        let text = cfg.to_toml_string().expect("serialize");
        let back = Config::from_toml_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let mut cfg = Config::default();
        cfg.thresholds.fair = 80;
        cfg.thresholds.good = 70;
        assert!(matches!(
            cfg.validate(),
            Err(AssessmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let mut cfg = Config::default();
        cfg.weights.stress = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn clamp_score_rounds_and_bounds() {
        assert_eq!(utils::clamp_score(89.5), 90);
        assert_eq!(utils::clamp_score(-3.0), 0);
        assert_eq!(utils::clamp_score(120.0), 100);
        assert_eq!(utils::clamp_score(f64::NAN), 0);
    }

    #[test]
    fn normalize_composes_decomposed_accents() {
        assert_eq!(utils::normalize("  come\u{301} "), "comé");
    }
}
