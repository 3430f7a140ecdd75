//! Categorized pronunciation errors found by a language's phonetic analyzer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    VowelConfusion,
    ConsonantConfusion,
    SilentLetterError,
    AccentPositionError,
    AccentCountError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::VowelConfusion => "vowel_confusion",
            ErrorKind::ConsonantConfusion => "consonant_confusion",
            ErrorKind::SilentLetterError => "silent_letter_error",
            ErrorKind::AccentPositionError => "accent_position_error",
            ErrorKind::AccentCountError => "accent_count_error",
        }
    }

    /// Parse the snake_case name used in configuration files.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "vowel" | "vowel_confusion" => Some(ErrorKind::VowelConfusion),
            "consonant" | "consonant_confusion" => Some(ErrorKind::ConsonantConfusion),
            "silent" | "silent_letter_error" => Some(ErrorKind::SilentLetterError),
            "accent_position" | "accent_position_error" => Some(ErrorKind::AccentPositionError),
            "accent_count" | "accent_count_error" => Some(ErrorKind::AccentCountError),
            _ => None,
        }
    }
}

/// Ordered so that `High` sorts last; rank with `Reverse` for worst-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

/// One detected error pattern with learner-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFinding {
    pub kind: ErrorKind,
    pub description: String,
    pub suggestion: String,
    pub severity: Severity,
}

impl ErrorFinding {
    pub fn new<D: Into<String>, S: Into<String>>(
        kind: ErrorKind,
        description: D,
        suggestion: S,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            suggestion: suggestion.into(),
            severity,
        }
    }
}
