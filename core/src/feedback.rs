//! Feedback text and remediation suggestions.
//!
//! Feedback is a threshold ladder over the final accuracy; the semantic
//! classification, when present, sets the tone instead. Suggestions are
//! assembled from the classification, one entry per distinct error kind
//! (worst first) and a fluency hint, then deduplicated and capped.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::{
    AssessmentContext, CompositeScore, ErrorFinding, FluencyScores, SemanticClassification,
    SemanticType, Thresholds,
};

pub const EXACT_MATCH_MESSAGE: &str = "Perfect! Your pronunciation matches the target exactly.";
pub const EXCELLENT_MESSAGE: &str = "Excellent pronunciation! Just a tiny detail away from perfect.";
pub const GOOD_MESSAGE: &str = "Good pronunciation. A few sounds still need some polish.";
pub const FAIR_MESSAGE: &str = "Fair attempt. Listen to the model again and focus on the marked sounds.";
pub const POOR_MESSAGE: &str = "Keep practicing. Several sounds differ from the target form.";
pub const VERY_POOR_MESSAGE: &str =
    "That was quite different from the target. Listen carefully and try again slowly.";

pub const ENCOURAGEMENT: &str = "Keep practicing to build confidence with this form.";
pub const HESITATION_SUGGESTION: &str =
    "Try answering a little faster: say the form out loud before you overthink it.";

pub const TECHNICAL_ERROR_MESSAGE: &str =
    "A technical error occurred while assessing your pronunciation.";
pub const RETRY_SUGGESTION: &str = "Please try recording your answer again.";

/// Builds learner-facing text from a scored attempt.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackGenerator {
    thresholds: Thresholds,
    max_suggestions: usize,
}

impl FeedbackGenerator {
    pub fn new(thresholds: Thresholds, max_suggestions: usize) -> Self {
        Self {
            thresholds,
            max_suggestions: max_suggestions.max(1),
        }
    }

    /// One canonical message per accuracy band.
    pub fn ladder_message(&self, accuracy: u8, exact_match: bool) -> &'static str {
        let t = &self.thresholds;
        if exact_match || accuracy >= t.perfect {
            EXACT_MATCH_MESSAGE
        } else if accuracy >= t.excellent {
            EXCELLENT_MESSAGE
        } else if accuracy >= t.good {
            GOOD_MESSAGE
        } else if accuracy >= t.fair {
            FAIR_MESSAGE
        } else if accuracy >= t.poor {
            POOR_MESSAGE
        } else {
            VERY_POOR_MESSAGE
        }
    }

    /// Feedback text for the final result.
    pub fn feedback(
        &self,
        score: &CompositeScore,
        exact_match: bool,
        classification: Option<&SemanticClassification>,
        context: &AssessmentContext,
    ) -> String {
        let Some(c) = classification else {
            return self.ladder_message(score.accuracy, exact_match).to_string();
        };
        if let Some(message) = c.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }
        match c.kind {
            SemanticType::ExactMatch => EXACT_MATCH_MESSAGE.to_string(),
            SemanticType::ValidConjugation => {
                "Correct! That is an accepted form of this verb.".to_string()
            }
            SemanticType::AccentError => {
                "Almost! Pay attention to the accentuation: the written accent moves the stress and changes the form."
                    .to_string()
            }
            SemanticType::DifferentVerb => match context.lemma.as_deref() {
                Some(lemma) => format!(
                    "That's a different verb. We were looking for a form of \"{}\".",
                    lemma
                ),
                None => "That's a different verb. Listen to the target form and try again."
                    .to_string(),
            },
            SemanticType::WrongContext => {
                let wanted = describe_form(context);
                if wanted.is_empty() {
                    "Right verb, but not the form that was asked for.".to_string()
                } else {
                    format!("Right verb, but we were looking for the {} form.", wanted)
                }
            }
            SemanticType::MinorPronunciation | SemanticType::IncorrectWord => {
                self.ladder_message(score.accuracy, false).to_string()
            }
        }
    }

    /// Ranked, deduplicated and capped suggestions. Never empty.
    pub fn suggestions(
        &self,
        findings: &[ErrorFinding],
        fluency: &FluencyScores,
        classification: Option<&SemanticClassification>,
    ) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();

        if let Some(s) = classification.and_then(|c| c.suggestion.as_deref()) {
            out.push(s.to_string());
        }

        let mut ranked: Vec<&ErrorFinding> = findings.iter().collect();
        // Stable: equal severities keep detection order
        ranked.sort_by_key(|f| Reverse(f.severity));
        let mut kinds_seen = HashSet::new();
        for finding in ranked {
            if kinds_seen.insert(finding.kind) {
                out.push(finding.suggestion.clone());
            }
        }

        if fluency.hesitation_detected {
            out.push(HESITATION_SUGGESTION.to_string());
        }

        if findings.is_empty() {
            out.push(ENCOURAGEMENT.to_string());
        }

        let mut seen = HashSet::new();
        out.retain(|s| !s.trim().is_empty() && seen.insert(s.clone()));
        out.truncate(self.max_suggestions);

        if out.is_empty() {
            out.push(ENCOURAGEMENT.to_string());
        }
        out
    }
}

/// "present indicative 1s", skipping whatever is unknown.
fn describe_form(context: &AssessmentContext) -> String {
    [&context.tense, &context.mood, &context.person]
        .iter()
        .filter_map(|f| f.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Severity};

    fn generator() -> FeedbackGenerator {
        FeedbackGenerator::new(Thresholds::default(), 4)
    }

    fn calm() -> FluencyScores {
        FluencyScores {
            clarity: 100,
            timing: 100,
            hesitation_detected: false,
        }
    }

    fn finding(kind: ErrorKind, severity: Severity, suggestion: &str) -> ErrorFinding {
        ErrorFinding::new(kind, "desc", suggestion, severity)
    }

    #[test]
    fn ladder_bands() {
        let g = generator();
        assert_eq!(g.ladder_message(70, true), EXACT_MATCH_MESSAGE);
        assert_eq!(g.ladder_message(100, false), EXACT_MATCH_MESSAGE);
        assert_eq!(g.ladder_message(92, false), EXCELLENT_MESSAGE);
        assert_eq!(g.ladder_message(80, false), GOOD_MESSAGE);
        assert_eq!(g.ladder_message(60, false), FAIR_MESSAGE);
        assert_eq!(g.ladder_message(45, false), POOR_MESSAGE);
        assert_eq!(g.ladder_message(10, false), VERY_POOR_MESSAGE);
    }

    #[test]
    fn classification_message_wins() {
        let c = SemanticClassification::new(SemanticType::IncorrectWord, 20.0)
            .with_message("Custom message");
        let score = CompositeScore {
            accuracy: 20,
            is_correct_for_srs: false,
        };
        let text = generator().feedback(&score, false, Some(&c), &AssessmentContext::default());
        assert_eq!(text, "Custom message");
    }

    #[test]
    fn accent_error_mentions_accentuation() {
        let c = SemanticClassification::new(SemanticType::AccentError, 85.0);
        let score = CompositeScore {
            accuracy: 85,
            is_correct_for_srs: false,
        };
        let text = generator().feedback(&score, true, Some(&c), &AssessmentContext::default());
        assert!(text.contains("accentuation"));
    }

    #[test]
    fn different_verb_names_the_lemma() {
        let c = SemanticClassification::new(SemanticType::DifferentVerb, 10.0);
        let ctx = AssessmentContext {
            lemma: Some("hablar".into()),
            ..Default::default()
        };
        let score = CompositeScore {
            accuracy: 10,
            is_correct_for_srs: false,
        };
        let text = generator().feedback(&score, false, Some(&c), &ctx);
        assert!(text.contains("different verb"));
        assert!(text.contains("hablar"));
    }

    #[test]
    fn wrong_context_describes_expected_form() {
        let c = SemanticClassification::new(SemanticType::WrongContext, 50.0);
        let ctx = AssessmentContext {
            tense: Some("preterite".into()),
            person: Some("1s".into()),
            ..Default::default()
        };
        let score = CompositeScore {
            accuracy: 50,
            is_correct_for_srs: false,
        };
        let text = generator().feedback(&score, false, Some(&c), &ctx);
        assert!(text.contains("preterite 1s"));
    }

    #[test]
    fn no_findings_yields_encouragement() {
        let s = generator().suggestions(&[], &calm(), None);
        assert_eq!(s, vec![ENCOURAGEMENT.to_string()]);
    }

    #[test]
    fn one_suggestion_per_kind_worst_first() {
        let findings = vec![
            finding(ErrorKind::VowelConfusion, Severity::Low, "vowel drill a/e"),
            finding(ErrorKind::VowelConfusion, Severity::Low, "vowel drill o/u"),
            finding(ErrorKind::ConsonantConfusion, Severity::High, "trill rr"),
        ];
        let s = generator().suggestions(&findings, &calm(), None);
        assert_eq!(s, vec!["trill rr".to_string(), "vowel drill a/e".to_string()]);
    }

    #[test]
    fn suggestions_are_deduplicated_and_capped() {
        let hesitant = FluencyScores {
            hesitation_detected: true,
            ..calm()
        };
        let c = SemanticClassification::new(SemanticType::IncorrectWord, 30.0)
            .with_suggestion("same text");
        let findings = vec![
            finding(ErrorKind::VowelConfusion, Severity::Low, "same text"),
            finding(ErrorKind::ConsonantConfusion, Severity::Medium, "b/v"),
            finding(ErrorKind::SilentLetterError, Severity::Low, "silent h"),
            finding(ErrorKind::AccentCountError, Severity::Medium, "accents"),
        ];
        let s = generator().suggestions(&findings, &hesitant, Some(&c));
        assert_eq!(s.len(), 4);
        assert_eq!(s[0], "same text");
        assert_eq!(s.iter().filter(|x| x.as_str() == "same text").count(), 1);
    }

    #[test]
    fn hesitation_adds_fluency_hint() {
        let hesitant = FluencyScores {
            hesitation_detected: true,
            ..calm()
        };
        let s = generator().suggestions(&[], &hesitant, None);
        assert!(s.contains(&HESITATION_SUGGESTION.to_string()));
        assert!(s.contains(&ENCOURAGEMENT.to_string()));
    }
}
