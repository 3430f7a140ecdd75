//! Boundary types for the external semantic validator.
//!
//! The validator decides *what kind* of conjugation relationship holds between
//! target and transcript. It is owned elsewhere; the engine only consumes its
//! verdict, or falls back to weighted scoring when there is none.

use serde::{Deserialize, Serialize};

use crate::AssessmentContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    ExactMatch,
    ValidConjugation,
    AccentError,
    DifferentVerb,
    WrongContext,
    MinorPronunciation,
    IncorrectWord,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::ExactMatch => "exact_match",
            SemanticType::ValidConjugation => "valid_conjugation",
            SemanticType::AccentError => "accent_error",
            SemanticType::DifferentVerb => "different_verb",
            SemanticType::WrongContext => "wrong_context",
            SemanticType::MinorPronunciation => "minor_pronunciation",
            SemanticType::IncorrectWord => "incorrect_word",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticClassification {
    #[serde(rename = "type")]
    pub kind: SemanticType,
    /// `0..=100`; governs accuracy when present
    pub pedagogical_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SemanticClassification {
    pub fn new(kind: SemanticType, pedagogical_score: f64) -> Self {
        Self {
            kind,
            pedagogical_score,
            message: None,
            suggestion: None,
        }
    }

    pub fn with_message<T: Into<String>>(mut self, message: T) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Classifies whether a transcript is any valid conjugation of the target's
/// lemma.
///
/// Implementations may fail; the engine logs the error and scores the attempt
/// with the weighted regime instead.
pub trait SemanticValidator: Send + Sync {
    fn validate(
        &self,
        target: &str,
        recognized: &str,
        context: &AssessmentContext,
    ) -> anyhow::Result<SemanticClassification>;
}
