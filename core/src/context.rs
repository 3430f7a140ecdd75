//! Assessment request and its contextual metadata.
//!
//! Plain data containers: the caller fills them in, the engine only reads.
//! A request is constructed fresh for every attempt.

use serde::{Deserialize, Serialize};

/// Recognizer confidence assumed when the capture layer did not report one.
pub const DEFAULT_CONFIDENCE: f32 = 0.8;

/// Response latency assumed when the capture layer did not report one.
pub const DEFAULT_TIMING_MS: u64 = 1000;

/// Metadata about the attempt: which form was asked for and how the
/// recognizer perceived the answer.
///
/// Fields missing from serialized input take their defaults, so a context of
/// `{}` is valid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentContext {
    /// Infinitive of the verb being practised (e.g. "hablar")
    pub lemma: Option<String>,
    /// Grammatical mood (e.g. "indicative")
    pub mood: Option<String>,
    /// Tense (e.g. "present")
    pub tense: Option<String>,
    /// Person/number (e.g. "1s")
    pub person: Option<String>,
    /// Recognizer confidence in `[0, 1]`
    pub confidence: f32,
    /// Time from prompt to the final transcript, in milliseconds
    pub timing_ms: u64,
}

impl Default for AssessmentContext {
    fn default() -> Self {
        Self {
            lemma: None,
            mood: None,
            tense: None,
            person: None,
            confidence: DEFAULT_CONFIDENCE,
            timing_ms: DEFAULT_TIMING_MS,
        }
    }
}

impl AssessmentContext {
    /// Context with only recognizer measurements filled in.
    pub fn with_measurements(confidence: f32, timing_ms: u64) -> Self {
        Self {
            confidence,
            timing_ms,
            ..Self::default()
        }
    }

    /// Recognizer confidence clamped into `[0, 1]`. Non-finite values fall
    /// back to the default.
    pub fn effective_confidence(&self) -> f32 {
        if self.confidence.is_finite() {
            self.confidence.clamp(0.0, 1.0)
        } else {
            DEFAULT_CONFIDENCE
        }
    }
}

/// One attempt to assess: the expected form, what was heard, and context.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AssessmentRequest {
    pub target: String,
    pub recognized: String,
    #[serde(default)]
    pub context: AssessmentContext,
}

impl AssessmentRequest {
    pub fn new<T: Into<String>, R: Into<String>>(
        target: T,
        recognized: R,
        context: AssessmentContext,
    ) -> Self {
        Self {
            target: target.into(),
            recognized: recognized.into(),
            context,
        }
    }

    /// Build a request from a speech-capture result.
    ///
    /// Interim results are ignored: only a record with `is_final` set is
    /// ever assessed. The recognizer's confidence and the measured latency
    /// replace whatever `context` carried.
    pub fn from_recognition(
        target: &str,
        result: &RecognitionResult,
        timing_ms: u64,
        context: AssessmentContext,
    ) -> Option<Self> {
        if !result.is_final {
            return None;
        }
        Some(Self {
            target: target.to_string(),
            recognized: result.transcript.clone(),
            context: AssessmentContext {
                confidence: result.confidence,
                timing_ms,
                ..context
            },
        })
    }
}

/// Result record delivered by the speech-capture collaborator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub transcript: String,
    pub confidence: f32,
    #[serde(default)]
    pub alternatives: Vec<String>,
    pub is_final: bool,
}
