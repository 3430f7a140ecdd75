//! libespanol crate root
//!
//! Spanish pronunciation assessment for conjugated verb forms: normalization,
//! phonetic and stress heuristics, and an `Engine` that composes them with
//! the shared `libpronuncia-core` pipeline.
//!
//! Public API exported here:
//! - `Engine` and `SpanishProfile` from `engine`
//! - `SpanishConfig` from `config`
//! - `ConfusionTable` and the default rule set from `confusion`
//! - `guide` from `guide`

pub mod breakdown;
pub mod config;
pub mod confusion;
pub mod engine;
pub mod guide;
pub mod normalizer;
pub mod phonetic;
pub mod stress;

// Core types callers need to build requests and read results.
pub use libpronuncia_core::{
    AssessmentContext, AssessmentError, AssessmentRequest, AssessmentResult, DetailedAnalysis,
    ErrorFinding, ErrorKind, PhoneticsBreakdown, RecognitionResult, SemanticClassification,
    SemanticType, SemanticValidator, Severity, StressClass, Thresholds,
};

pub use config::SpanishConfig;
pub use confusion::{
    common_spanish_errors, spanish_default_confusion_rules, ConfusionRule, ConfusionTable,
};
pub use engine::{Engine, SpanishProfile};
pub use guide::guide;
pub use phonetic::{consonant_error_severity, detect_accent_errors, PhoneticAnalyzer};
