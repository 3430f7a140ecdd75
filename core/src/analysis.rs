//! Intermediate results produced by a language profile.
//!
//! Everything here lives for one assessment call only.

use serde::{Deserialize, Serialize};

use crate::ErrorFinding;

/// Target and transcript after normalization, with the originals retained
/// for accent-sensitive checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPair {
    pub target_original: String,
    pub recognized_original: String,
    pub target: String,
    pub recognized: String,
}

impl NormalizedPair {
    pub fn is_identical(&self) -> bool {
        self.target == self.recognized
    }
}

/// Vowel/consonant/diphthong correspondence and the errors detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticAnalysis {
    pub vowel_accuracy: u8,
    pub consonant_accuracy: u8,
    pub diphthong_accuracy: u8,
    pub overall: u8,
    pub findings: Vec<ErrorFinding>,
}

impl PhoneticAnalysis {
    /// Perfect sub-scores with nothing to report.
    pub fn perfect() -> Self {
        Self {
            vowel_accuracy: 100,
            consonant_accuracy: 100,
            diphthong_accuracy: 100,
            overall: 100,
            findings: Vec::new(),
        }
    }
}

/// Where the stressed syllable of a word falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressClass {
    Monosyllable,
    /// Stress on the last syllable
    Final,
    /// Stress on the second-to-last syllable
    Penultimate,
    /// Stress marked by a written accent
    Antepenultimate,
}

impl StressClass {
    pub fn label(&self) -> &'static str {
        match self {
            StressClass::Monosyllable => "monosyllable",
            StressClass::Final => "final-stressed",
            StressClass::Penultimate => "penultimate-stressed",
            StressClass::Antepenultimate => "antepenultimate (written accent)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressAnalysis {
    pub syllable_count: usize,
    pub stress_class: StressClass,
    pub accuracy: u8,
}

/// A hard-to-pronounce element in the target, with an articulatory tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyElement {
    pub element: String,
    /// Character offset in the normalized target
    pub position: usize,
    pub tip: String,
}

/// Educational decomposition of the target word. Display only; never scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticsBreakdown {
    pub word: String,
    pub syllable_count: usize,
    pub vowels: String,
    pub consonants: String,
    pub stress_class: StressClass,
    pub difficulties: Vec<DifficultyElement>,
}
