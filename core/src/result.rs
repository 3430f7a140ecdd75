//! The assessment result returned to callers.

use serde::{Deserialize, Serialize};

use crate::feedback::{RETRY_SUGGESTION, TECHNICAL_ERROR_MESSAGE};
use crate::{
    ErrorFinding, FluencyScores, PhoneticAnalysis, PhoneticsBreakdown, SemanticType,
    StressAnalysis, TextComparison,
};

/// Sub-scores behind an accuracy, for detailed display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    /// `"weighted"` or `"semantic_anchored"`
    pub strategy: String,
    pub semantic_type: Option<SemanticType>,
    pub text: TextComparison,
    pub phonetic: PhoneticAnalysis,
    pub stress: StressAnalysis,
    pub fluency: FluencyScores,
}

impl DetailedAnalysis {
    pub fn findings(&self) -> &[ErrorFinding] {
        &self.phonetic.findings
    }
}

/// Outcome of one assessment. Stateless; rebuilt on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    /// `0..=100`
    pub accuracy: u8,
    /// Whether the attempt counts as correct for spaced repetition
    #[serde(rename = "isCorrectForSRS")]
    pub is_correct_for_srs: bool,
    pub feedback: String,
    pub suggestions: Vec<String>,
    /// Absent only on the technical-error result
    pub detailed_analysis: Option<DetailedAnalysis>,
    pub phonetics_breakdown: Option<PhoneticsBreakdown>,
}

impl AssessmentResult {
    /// Well-formed result for an attempt that could not be assessed.
    pub fn technical_error() -> Self {
        Self {
            accuracy: 0,
            is_correct_for_srs: false,
            feedback: TECHNICAL_ERROR_MESSAGE.to_string(),
            suggestions: vec![RETRY_SUGGESTION.to_string()],
            detailed_analysis: None,
            phonetics_breakdown: None,
        }
    }

    pub fn is_technical_error(&self) -> bool {
        self.detailed_analysis.is_none() && self.feedback == TECHNICAL_ERROR_MESSAGE
    }

    pub fn findings(&self) -> &[ErrorFinding] {
        self.detailed_analysis
            .as_ref()
            .map(|d| d.findings())
            .unwrap_or(&[])
    }
}
