//! Phonetic feature analysis of a Spanish target/transcript pair.
//!
//! Works on recognizer text only: vowel, consonant and diphthong
//! correspondence is estimated from spelling, and known confusable pairs are
//! detected by comparing how often each side of a pair occurs in the target
//! and in the transcript.
//!
//! Overall score: vowels 30%, consonants 40%, diphthongs 20%, and 10% that
//! loses 10 points per finding.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::Regex;

use libpronuncia_core::distance::levenshtein_chars;
use libpronuncia_core::utils::clamp_score;
use libpronuncia_core::{ErrorFinding, ErrorKind, NormalizedPair, PhoneticAnalysis, Severity};

use crate::confusion::{common_spanish_errors, ConfusionRule, ConfusionTable};
use crate::normalizer::{canonicalize, count_unit, is_accented_vowel, is_vowel};

/// Two adjacent vowels (`ü` included). Matches are non-overlapping.
static DIPHTHONG: Lazy<Regex> =
    Lazy::new(|| Regex::new("[aeiouü]{2}").expect("diphthong pattern is valid"));

/// Articulation tips for consonant pairs, keyed `"a=b"` as written in the
/// default rules.
static CONSONANT_TIPS: phf::Map<&'static str, &'static str> = phf_map! {
    "r=rr" => "tap the tongue once for 'r', let it trill for 'rr' (pero vs. perro)",
    "ñ=n" => "'ñ' sounds like the 'ny' in 'canyon' (año vs. ano)",
    "b=v" => "both sound alike in Spanish, but the spelling of the form still matters",
    "c=s" => "before 'e' and 'i', 'c' is an 's' sound in Latin America and 'th' in Spain",
    "z=s" => "'z' is pronounced like 's' in Latin America and like 'th' in Spain",
    "j=h" => "'j' is a raspy sound from the throat, while 'h' is always silent",
    "g=j" => "'g' before 'e' or 'i' sounds like 'j', elsewhere it is a hard 'g'",
    "ll=y" => "'ll' and 'y' sound alike for most speakers; practise the spelling of the form",
};

const SILENT_H_SUGGESTION: &str =
    "Remember that 'h' is always silent in Spanish, but the form is still written with it.";
const LL_SUGGESTION: &str = "Pronounce 'll' like the 'y' in 'yes', as a single sound.";
const J_SUGGESTION: &str = "Make the 'j' a strong, raspy sound from the back of the throat.";
const ACCENT_COUNT_SUGGESTION: &str =
    "Check which syllable carries the written accent: it changes the form (hablo vs. habló).";
const ACCENT_POSITION_SUGGESTION: &str =
    "Stress the syllable with the written accent, not a neighbouring one (hablo vs. habló).";

/// Severity of confusing two consonants, per the default rules. Pairs not in
/// the table are `Low`.
pub fn consonant_error_severity(a: &str, b: &str) -> Severity {
    common_spanish_errors()
        .get(a, b)
        .filter(|r| r.kind == ErrorKind::ConsonantConfusion)
        .map(|r| r.severity)
        .unwrap_or(Severity::Low)
}

/// Compare written accents of the raw target and transcript.
///
/// Emits an `accent_count_error` when the number of accents differs and an
/// `accent_position_error` when the count matches but the accented letters
/// or their positions do not.
pub fn detect_accent_errors(target: &str, recognized: &str) -> Vec<ErrorFinding> {
    let target_accents = written_accents(&canonicalize(target));
    let recognized_accents = written_accents(&canonicalize(recognized));

    if target_accents.len() != recognized_accents.len() {
        return vec![ErrorFinding::new(
            ErrorKind::AccentCountError,
            format!(
                "Expected {} written accent(s), heard {}",
                target_accents.len(),
                recognized_accents.len()
            ),
            ACCENT_COUNT_SUGGESTION,
            Severity::Medium,
        )];
    }
    if target_accents != recognized_accents {
        return vec![ErrorFinding::new(
            ErrorKind::AccentPositionError,
            "The stress falls on a different syllable than the written accent",
            ACCENT_POSITION_SUGGESTION,
            Severity::Medium,
        )];
    }
    Vec::new()
}

fn written_accents(canonical: &str) -> Vec<(usize, char)> {
    canonical
        .chars()
        .enumerate()
        .filter(|(_, c)| is_accented_vowel(*c))
        .collect()
}

/// Stateless analyzer; the confusion table is fixed at construction.
#[derive(Debug, Clone)]
pub struct PhoneticAnalyzer {
    confusions: ConfusionTable,
    check_silent_letters: bool,
    check_accents: bool,
}

impl Default for PhoneticAnalyzer {
    fn default() -> Self {
        Self::new(common_spanish_errors().clone(), true, true)
    }
}

impl PhoneticAnalyzer {
    pub fn new(confusions: ConfusionTable, check_silent_letters: bool, check_accents: bool) -> Self {
        Self {
            confusions,
            check_silent_letters,
            check_accents,
        }
    }

    pub fn confusions(&self) -> &ConfusionTable {
        &self.confusions
    }

    pub fn analyze(&self, pair: &NormalizedPair) -> PhoneticAnalysis {
        // Heuristics only produce false positives on a correct answer; the
        // written-accent comparison is exact and still applies.
        if pair.is_identical() {
            return PhoneticAnalysis {
                findings: self.accent_findings(pair),
                ..PhoneticAnalysis::perfect()
            };
        }

        let vowel_accuracy = vowel_accuracy(&pair.target, &pair.recognized);
        let consonant_accuracy = consonant_accuracy(&pair.target, &pair.recognized);
        let diphthong_accuracy = diphthong_accuracy(&pair.target, &pair.recognized);
        let findings = self.findings(pair);

        let finding_term = (100.0 - 10.0 * findings.len() as f64).max(0.0);
        let overall = clamp_score(
            vowel_accuracy as f64 * 0.3
                + consonant_accuracy as f64 * 0.4
                + diphthong_accuracy as f64 * 0.2
                + finding_term * 0.1,
        );

        PhoneticAnalysis {
            vowel_accuracy,
            consonant_accuracy,
            diphthong_accuracy,
            overall,
            findings,
        }
    }

    /// All error patterns for a pair, in detection order: confusions, then
    /// silent letters, then accents.
    pub fn findings(&self, pair: &NormalizedPair) -> Vec<ErrorFinding> {
        let mut findings = Vec::new();
        let mut confused_units: HashSet<&str> = HashSet::new();

        for rule in self.confusions.rules() {
            if is_confused(rule, &pair.target, &pair.recognized) {
                confused_units.insert(rule.a.as_str());
                confused_units.insert(rule.b.as_str());
                findings.push(confusion_finding(rule));
            }
        }

        if self.check_silent_letters {
            findings.extend(silent_letter_findings(pair, &confused_units));
        }

        findings.extend(self.accent_findings(pair));
        findings
    }

    fn accent_findings(&self, pair: &NormalizedPair) -> Vec<ErrorFinding> {
        if !self.check_accents {
            return Vec::new();
        }
        detect_accent_errors(&pair.target_original, &pair.recognized_original)
    }
}

/// A pair is confused when one side lost occurrences the other side gained.
fn is_confused(rule: &ConfusionRule, target: &str, recognized: &str) -> bool {
    let (ta, ra) = (count_unit(target, &rule.a), count_unit(recognized, &rule.a));
    let (tb, rb) = (count_unit(target, &rule.b), count_unit(recognized, &rule.b));
    (ta > ra && rb > tb) || (tb > rb && ra > ta)
}

fn confusion_finding(rule: &ConfusionRule) -> ErrorFinding {
    let description = format!("Confusion between '{}' and '{}'", rule.a, rule.b);
    let suggestion = match rule.kind {
        ErrorKind::VowelConfusion => format!(
            "Practise the vowels '{}' and '{}': Spanish vowels are short, pure and never reduced.",
            rule.a, rule.b
        ),
        _ => {
            let key = format!("{}={}", rule.a, rule.b);
            let reversed = format!("{}={}", rule.b, rule.a);
            match CONSONANT_TIPS
                .get(key.as_str())
                .or_else(|| CONSONANT_TIPS.get(reversed.as_str()))
            {
                Some(tip) => format!("Drill the pair '{}' / '{}': {}.", rule.a, rule.b, tip),
                None => format!(
                    "Drill the consonant pair '{}' / '{}' with minimal pairs.",
                    rule.a, rule.b
                ),
            }
        }
    };
    ErrorFinding::new(rule.kind, description, suggestion, rule.severity)
}

/// `h`, `ll` and `j` in the target that the transcript lost, unless a
/// confusion rule already explains the loss.
fn silent_letter_findings(pair: &NormalizedPair, confused: &HashSet<&str>) -> Vec<ErrorFinding> {
    let checks = [
        ("h", "The silent 'h' is missing from the form", SILENT_H_SUGGESTION),
        ("ll", "The 'll' sound was not recognized", LL_SUGGESTION),
        ("j", "The 'j' sound was not recognized", J_SUGGESTION),
    ];
    checks
        .iter()
        .filter(|(unit, _, _)| !confused.contains(unit))
        .filter(|(unit, _, _)| count_unit(&pair.target, unit) > count_unit(&pair.recognized, unit))
        .map(|(_, description, suggestion)| {
            ErrorFinding::new(
                ErrorKind::SilentLetterError,
                *description,
                *suggestion,
                Severity::Low,
            )
        })
        .collect()
}

fn vowels(text: &str) -> Vec<char> {
    text.chars().filter(|c| is_vowel(*c)).collect()
}

fn consonants(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !is_vowel(*c) && !c.is_whitespace())
        .collect()
}

/// Fraction of matching items at the same position, over the target length.
fn positional_accuracy<T: PartialEq>(target: &[T], recognized: &[T]) -> u8 {
    if target.is_empty() {
        return if recognized.is_empty() { 100 } else { 0 };
    }
    let correct = target
        .iter()
        .zip(recognized.iter())
        .filter(|(t, r)| t == r)
        .count();
    clamp_score(correct as f64 / target.len() as f64 * 100.0)
}

pub fn vowel_accuracy(target: &str, recognized: &str) -> u8 {
    positional_accuracy(&vowels(target), &vowels(recognized))
}

pub fn consonant_accuracy(target: &str, recognized: &str) -> u8 {
    let t = consonants(target);
    let r = consonants(recognized);
    if t.is_empty() {
        return if r.is_empty() { 100 } else { 0 };
    }
    let distance = levenshtein_chars(&t, &r);
    clamp_score((t.len() as f64 - distance as f64) / t.len() as f64 * 100.0)
}

pub fn diphthong_accuracy(target: &str, recognized: &str) -> u8 {
    let t: Vec<&str> = DIPHTHONG.find_iter(target).map(|m| m.as_str()).collect();
    if t.is_empty() {
        return 100;
    }
    let r: Vec<&str> = DIPHTHONG.find_iter(recognized).map(|m| m.as_str()).collect();
    positional_accuracy(&t, &r)
}
