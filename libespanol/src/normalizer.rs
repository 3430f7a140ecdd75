//! Spanish text normalization.
//!
//! Two forms are produced from a raw string:
//! - `canonicalize`: lower-cased, punctuation stripped, whitespace collapsed,
//!   written accents kept. Used for accent-sensitive checks.
//! - `normalize`: the canonical form with `á é í ó ú` folded to their base
//!   vowels. Used for every other comparison.
//!
//! `ñ` and `ü` are letters in their own right and are never folded.

use libpronuncia_core::utils;

/// Punctuation removed before comparison.
pub const STRIPPED_PUNCTUATION: &[char] = &['¿', '¡', '.', ',', ';', ':', '!', '?'];

/// Digraphs treated as a single phonetic unit.
const DIGRAPHS: &[&str] = &["rr", "ll", "ch"];

/// Lower-case, strip punctuation and collapse whitespace; keep accents.
pub fn canonicalize(text: &str) -> String {
    let composed = utils::normalize(text).to_lowercase();
    let stripped: String = composed
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    utils::collapse_whitespace(&stripped)
}

/// Canonical form with accented vowels folded.
pub fn normalize(text: &str) -> String {
    fold_accents(&canonicalize(text))
}

pub fn fold_accents(text: &str) -> String {
    text.chars().map(fold_accent).collect()
}

pub fn fold_accent(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' => 'o',
        'ú' => 'u',
        other => other,
    }
}

/// Vowel of a normalized string, `ü` included.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'ü')
}

pub fn is_accented_vowel(c: char) -> bool {
    matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ú')
}

/// Split a normalized string into phonetic units with their character
/// offsets. `rr`, `ll` and `ch` are one unit each; whitespace is dropped.
pub fn phonetic_units(text: &str) -> Vec<(usize, &str)> {
    let mut units = Vec::new();
    let indices: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;
    while i < indices.len() {
        let (start, c) = indices[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if let Some(&(next_start, next)) = indices.get(i + 1) {
            let end = next_start + next.len_utf8();
            let pair = &text[start..end];
            if DIGRAPHS.contains(&pair) {
                units.push((i, pair));
                i += 2;
                continue;
            }
        }
        units.push((i, &text[start..start + c.len_utf8()]));
        i += 1;
    }
    units
}

/// Number of occurrences of `unit` among the phonetic units of `text`.
pub fn count_unit(text: &str, unit: &str) -> usize {
    phonetic_units(text)
        .into_iter()
        .filter(|(_, u)| *u == unit)
        .count()
}
