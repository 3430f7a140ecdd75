//! Edit-distance comparison of normalized strings.

use serde::{Deserialize, Serialize};

use crate::AssessmentError;

/// Outcome of comparing a normalized target with a normalized transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextComparison {
    /// Levenshtein distance in characters
    pub distance: usize,
    /// `0..=100`, 100 for identical strings
    pub similarity: u8,
    /// Post-normalization equality, independent of `distance`
    pub exact_match: bool,
}

impl TextComparison {
    /// Compare two already-normalized strings.
    ///
    /// Fails when either side exceeds `max_chars`, which keeps the DP matrix
    /// bounded.
    pub fn compare(
        target: &str,
        recognized: &str,
        max_chars: usize,
    ) -> Result<Self, AssessmentError> {
        check_len("target", target, max_chars)?;
        check_len("recognized", recognized, max_chars)?;

        let distance = levenshtein(target, recognized);
        let max_len = target.chars().count().max(recognized.chars().count());
        Ok(Self {
            distance,
            similarity: similarity_percent(distance, max_len),
            exact_match: target == recognized,
        })
    }
}

fn check_len(field: &'static str, s: &str, max: usize) -> Result<(), AssessmentError> {
    let len = s.chars().count();
    if len > max {
        return Err(AssessmentError::InputTooLong { field, len, max });
    }
    Ok(())
}

/// Levenshtein distance over characters.
///
/// Insertions, deletions and substitutions each cost 1. The matrix has
/// `len(b) + 1` rows and `len(a) + 1` columns.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Levenshtein distance over pre-split units.
pub fn levenshtein_chars<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let cols = a.len() + 1;
    let rows = b.len() + 1;
    let mut matrix = vec![vec![0usize; cols]; rows];

    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }

    for i in 1..rows {
        for j in 1..cols {
            let substitution = if b[i - 1] == a[j - 1] { 0 } else { 1 };
            matrix[i][j] = (matrix[i - 1][j - 1] + substitution)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j] + 1);
        }
    }

    matrix[rows - 1][cols - 1]
}

/// `((max_len - distance) / max_len) * 100`, rounded. Two empty strings are
/// 100% similar.
pub fn similarity_percent(distance: usize, max_len: usize) -> u8 {
    if max_len == 0 {
        return 100;
    }
    let kept = max_len.saturating_sub(distance) as f64;
    crate::utils::clamp_score(kept / max_len as f64 * 100.0)
}
