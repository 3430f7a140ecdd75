// libespanol/src/guide.rs
//
// Pronunciation guide rendering for the text shown next to the target form.
//
// The guide spells a word in capitals the way an English speaker would read
// it aloud, rewriting the Spanish digraphs that trip learners up:
// - ll → LY (llave → LYAVE)
// - ñ  → NY (niño → NINYO)
// - rr stays RR, in capitals, so the trill is visible
//
// Written accents are folded; stress is shown elsewhere.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::normalizer::normalize;

/// Spelling → guide rewrites
static DIGRAPH_GUIDE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("ll", "LY");
    m.insert("ñ", "NY");
    m.insert("rr", "RR");
    m
});

/// Rewrites sorted longest first so digraphs win over single letters.
static ORDERED_RULES: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    let mut rules: Vec<_> = DIGRAPH_GUIDE.iter().map(|(k, v)| (*k, *v)).collect();
    rules.sort_by_key(|(k, _)| std::cmp::Reverse(k.chars().count()));
    rules
});

/// Render the pronunciation guide of a word or short phrase.
///
/// # Examples
/// ```
/// use libespanol::guide::guide;
///
/// assert_eq!(guide("llave"), "LYAVE");
/// assert_eq!(guide("niño"), "NINYO");
/// assert_eq!(guide("carro"), "CARRO");
/// ```
pub fn guide(word: &str) -> String {
    let text = normalize(word);
    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();

    'outer: while let Some(c) = rest.chars().next() {
        for (spelling, sound) in ORDERED_RULES.iter() {
            if let Some(tail) = rest.strip_prefix(*spelling) {
                out.push_str(sound);
                rest = tail;
                continue 'outer;
            }
        }
        out.extend(c.to_uppercase());
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ll_becomes_ly() {
        assert_eq!(guide("llave"), "LYAVE");
        assert_eq!(guide("calle"), "CALYE");
    }

    #[test]
    fn test_enye_becomes_ny() {
        assert_eq!(guide("niño"), "NINYO");
        assert_eq!(guide("Año"), "ANYO");
    }

    #[test]
    fn test_trill_is_kept_in_place() {
        let g = guide("carro");
        assert_eq!(g.find("RR"), Some(2));
        assert_eq!(g, "CARRO");
    }

    #[test]
    fn test_accents_and_punctuation_are_dropped() {
        assert_eq!(guide("¡Comí!"), "COMI");
        assert_eq!(guide("me llamo"), "ME LYAMO");
    }

    #[test]
    fn test_empty() {
        assert_eq!(guide(""), "");
    }
}
