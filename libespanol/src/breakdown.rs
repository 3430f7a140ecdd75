//! Educational decomposition of a target word for the detailed view.

use phf::phf_map;

use libpronuncia_core::{DifficultyElement, PhoneticsBreakdown};

use crate::normalizer::{canonicalize, is_vowel, normalize, phonetic_units};
use crate::stress::{count_syllables, stress_class};

/// Elements learners commonly struggle with, and how to articulate them.
static DIFFICULTY_TIPS: phf::Map<&'static str, &'static str> = phf_map! {
    "rr" => "Trill it: let the tip of the tongue vibrate several times behind the upper teeth.",
    "ñ" => "Like the 'ny' in 'canyon': press the middle of the tongue against the palate.",
    "j" => "A strong, raspy 'h' from the back of the throat.",
};

/// Breakdown of `target`. Reads only the target; never affects scoring.
pub fn build(target: &str) -> PhoneticsBreakdown {
    let normalized = normalize(target);
    let units = phonetic_units(&normalized);

    let vowels = normalized
        .chars()
        .filter(|c| is_vowel(*c))
        .map(String::from)
        .collect::<Vec<_>>()
        .join("-");
    let consonants = units
        .iter()
        .filter(|(_, u)| !u.chars().all(is_vowel))
        .map(|(_, u)| *u)
        .collect::<Vec<_>>()
        .join("-");
    let difficulties = units
        .iter()
        .filter_map(|&(position, unit)| {
            DIFFICULTY_TIPS.get(unit).map(|tip| DifficultyElement {
                element: unit.to_string(),
                position,
                tip: tip.to_string(),
            })
        })
        .collect();

    PhoneticsBreakdown {
        word: canonicalize(target),
        syllable_count: count_syllables(target),
        vowels,
        consonants,
        stress_class: stress_class(target),
        difficulties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libpronuncia_core::StressClass;

    #[test]
    fn skeletons_of_simple_verb() {
        let b = build("Hablo");
        assert_eq!(b.word, "hablo");
        assert_eq!(b.syllable_count, 2);
        assert_eq!(b.vowels, "a-o");
        assert_eq!(b.consonants, "h-b-l");
        assert_eq!(b.stress_class, StressClass::Final);
        assert!(b.difficulties.is_empty());
    }

    #[test]
    fn digraphs_stay_whole_in_consonant_skeleton() {
        assert_eq!(build("llamo").consonants, "ll-m");
        assert_eq!(build("corren").consonants, "c-rr-n");
    }

    #[test]
    fn flags_every_difficult_occurrence() {
        let b = build("jugaría");
        assert_eq!(b.difficulties.len(), 1);
        assert_eq!(b.difficulties[0].element, "j");
        assert_eq!(b.difficulties[0].position, 0);

        let b = build("Señor, corre");
        let elements: Vec<(&str, usize)> = b
            .difficulties
            .iter()
            .map(|d| (d.element.as_str(), d.position))
            .collect();
        assert_eq!(elements, vec![("ñ", 2), ("rr", 8)]);
    }

    #[test]
    fn keeps_written_accent_in_display_word() {
        let b = build("comí");
        assert_eq!(b.word, "comí");
        assert_eq!(b.vowels, "o-i");
        assert_eq!(b.stress_class, StressClass::Antepenultimate);
    }

    #[test]
    fn dieresis_u_is_a_vowel() {
        let b = build("pingüino");
        assert_eq!(b.vowels, "i-ü-i-o");
        assert_eq!(b.consonants, "p-n-g-n");
    }

    #[test]
    fn empty_target() {
        let b = build("");
        assert_eq!(b.syllable_count, 0);
        assert!(b.vowels.is_empty());
        assert!(b.consonants.is_empty());
    }
}
