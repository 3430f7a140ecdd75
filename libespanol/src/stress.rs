//! Syllable count and stress class of a Spanish target.
//!
//! Syllables are estimated from vowel groups in the accented spelling: every
//! maximal run of vowels is one syllable, plus one more when the run is not a
//! diphthong (hiatus, as in "leer" or "día").

use libpronuncia_core::{NormalizedPair, StressAnalysis, StressClass};

use crate::normalizer::{canonicalize, is_accented_vowel};

/// Stress accuracy reported for any non-exact answer.
///
/// TODO: score the actual stress displacement once the transcript's
/// syllables are aligned with the target's; this fixed value is a placeholder.
pub const NON_EXACT_STRESS_ACCURACY: u8 = 75;

fn is_strong(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'o' | 'á' | 'é' | 'ó')
}

/// Unstressed `i`/`u`. A written accent turns them into a hiatus nucleus.
fn is_weak(c: char) -> bool {
    matches!(c, 'i' | 'u' | 'ü')
}

fn is_syllabic_vowel(c: char) -> bool {
    is_strong(c) || is_weak(c) || matches!(c, 'í' | 'ú')
}

/// Whether a vowel run is pronounced in one syllable.
fn is_diphthong_group(group: &[char]) -> bool {
    match group {
        [a, b] => {
            (is_weak(*a) && is_strong(*b))
                || (is_strong(*a) && is_weak(*b))
                || (is_weak(*a) && is_weak(*b) && a != b)
        }
        [a, b, c] => is_weak(*a) && is_strong(*b) && is_weak(*c),
        _ => false,
    }
}

/// Vowel runs of a canonical (accented) string. The `u` of `qu` and of
/// `gu` before `e`/`i` is silent and does not start or extend a run.
fn vowel_groups(canonical: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = canonical.chars().collect();
    let mut groups = Vec::new();
    let mut current: Vec<char> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        let silent_u = c == 'u'
            && i > 0
            && (chars[i - 1] == 'q'
                || (chars[i - 1] == 'g'
                    && matches!(chars.get(i + 1), Some('e' | 'i' | 'é' | 'í'))));
        if is_syllabic_vowel(c) && !silent_u {
            current.push(c);
        } else if !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Estimated number of syllables in `word` (raw or canonical).
pub fn count_syllables(word: &str) -> usize {
    vowel_groups(&canonicalize(word))
        .iter()
        .map(|g| if g.len() > 1 && !is_diphthong_group(g) { 2 } else { 1 })
        .sum()
}

/// Stress class of the last word of `text`.
///
/// A written accent decides on its own; otherwise one-syllable words are
/// monosyllables, words ending in `n` or `s` are penultimate-stressed and
/// everything else is final-stressed.
pub fn stress_class(text: &str) -> StressClass {
    let canonical = canonicalize(text);
    let word = canonical.split(' ').last().unwrap_or("");

    if word.chars().any(is_accented_vowel) {
        StressClass::Antepenultimate
    } else if count_syllables(word) <= 1 {
        StressClass::Monosyllable
    } else if word.ends_with('n') || word.ends_with('s') {
        StressClass::Penultimate
    } else {
        StressClass::Final
    }
}

pub fn analyze(pair: &NormalizedPair, exact_match: bool) -> StressAnalysis {
    StressAnalysis {
        syllable_count: count_syllables(&pair.target_original),
        stress_class: stress_class(&pair.target_original),
        accuracy: if exact_match {
            100
        } else {
            NON_EXACT_STRESS_ACCURACY
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_words() {
        assert_eq!(count_syllables("hablo"), 2);
        assert_eq!(count_syllables("hablamos"), 3);
        assert_eq!(count_syllables("sé"), 1);
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn diphthongs_are_one_syllable() {
        assert_eq!(count_syllables("bueno"), 2);
        assert_eq!(count_syllables("tiene"), 2);
        assert_eq!(count_syllables("ciudad"), 2);
        assert_eq!(count_syllables("estudiáis"), 3);
    }

    #[test]
    fn hiatus_adds_a_syllable() {
        assert_eq!(count_syllables("leer"), 2);
        assert_eq!(count_syllables("día"), 2);
        assert_eq!(count_syllables("oír"), 2);
        assert_eq!(count_syllables("leí"), 2);
    }

    #[test]
    fn silent_u_is_skipped() {
        assert_eq!(count_syllables("quiero"), 2);
        assert_eq!(count_syllables("sigue"), 2);
        // "gua" keeps its u
        assert_eq!(count_syllables("agua"), 2);
    }

    #[test]
    fn stress_classes() {
        assert_eq!(stress_class("comí"), StressClass::Antepenultimate);
        assert_eq!(stress_class("hablábamos"), StressClass::Antepenultimate);
        assert_eq!(stress_class("doy"), StressClass::Monosyllable);
        assert_eq!(stress_class("hablan"), StressClass::Penultimate);
        assert_eq!(stress_class("comes"), StressClass::Penultimate);
        assert_eq!(stress_class("hablar"), StressClass::Final);
        assert_eq!(stress_class("yo hablar"), StressClass::Final);
    }

    #[test]
    fn accuracy_is_coarse() {
        let pair = NormalizedPair {
            target_original: "hablo".into(),
            recognized_original: "habla".into(),
            target: "hablo".into(),
            recognized: "habla".into(),
        };
        assert_eq!(analyze(&pair, false).accuracy, NON_EXACT_STRESS_ACCURACY);
        assert_eq!(analyze(&pair, true).accuracy, 100);
        assert_eq!(analyze(&pair, true).syllable_count, 2);
    }
}
