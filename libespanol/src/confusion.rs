//! Confusable sound pairs for Spanish learners.
//!
//! Rules are written as text so they can live in configuration files:
//! `"r=rr:high:consonant"`, `"a=e:low:vowel"` or just `"b=v"`.
//! Severity defaults to `low`; kind defaults to `vowel` when both sides are
//! plain vowels and `consonant` otherwise. Pairs are symmetric.
use once_cell::sync::Lazy;
use tracing::warn;

use libpronuncia_core::{ErrorKind, Severity};

use crate::normalizer::is_vowel;

/// A single confusable pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionRule {
    pub a: String,
    pub b: String,
    pub severity: Severity,
    pub kind: ErrorKind,
}

impl ConfusionRule {
    pub fn new(a: &str, b: &str, severity: Severity, kind: ErrorKind) -> Self {
        Self {
            a: a.to_string(),
            b: b.to_string(),
            severity,
            kind,
        }
    }

    /// Whether this rule relates `x` and `y`, in either order.
    pub fn relates(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn involves(&self, unit: &str) -> bool {
        self.a == unit || self.b == unit
    }
}

/// Immutable-after-construction table of confusable pairs.
#[derive(Debug, Clone, Default)]
pub struct ConfusionTable {
    rules: Vec<ConfusionRule>,
}

impl ConfusionTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build a table from textual rules. Malformed rules are skipped.
    pub fn from_rules(rules: &[String]) -> Self {
        let mut table = ConfusionTable::new();
        for raw in rules {
            match parse_rule(raw) {
                Some(rule) => table.add(rule),
                None => warn!(rule = %raw, "skipping malformed confusion rule"),
            }
        }
        table
    }

    /// Add a rule unless the same pair is already present.
    pub fn add(&mut self, rule: ConfusionRule) {
        if self.rules.iter().any(|r| r.relates(&rule.a, &rule.b)) {
            return;
        }
        self.rules.push(rule);
    }

    pub fn add_rule(&mut self, a: &str, b: &str, severity: Severity, kind: ErrorKind) {
        self.add(ConfusionRule::new(a, b, severity, kind));
    }

    pub fn rules(&self) -> &[ConfusionRule] {
        &self.rules
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&ConfusionRule> {
        self.rules.iter().find(|r| r.relates(a, b))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_rule(raw: &str) -> Option<ConfusionRule> {
    let (a, rest) = raw.split_once('=')?;
    let mut parts = rest.split(':');
    let a = a.trim();
    let b = parts.next()?.trim();
    if a.is_empty() || b.is_empty() || a == b {
        return None;
    }

    let severity = match parts.next() {
        Some(s) => Severity::parse(s)?,
        None => Severity::Low,
    };
    let kind = match parts.next() {
        Some(k) => ErrorKind::parse(k)?,
        None if is_vowel_unit(a) && is_vowel_unit(b) => ErrorKind::VowelConfusion,
        None => ErrorKind::ConsonantConfusion,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(ConfusionRule::new(a, b, severity, kind))
}

fn is_vowel_unit(unit: &str) -> bool {
    let mut chars = unit.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_vowel(c))
}

/// Returns the default confusion rules for Spanish.
///
/// - Vowels: a/e, e/i, o/u
/// - Trill vs. tap and ñ vs. n change meaning: high
/// - b/v, c/s, z/s: medium (seseo makes them common, spelling still matters)
/// - j/h, g/j, ll/y: low
pub fn spanish_default_confusion_rules() -> Vec<String> {
    vec![
        "a=e:low:vowel".into(),
        "e=i:low:vowel".into(),
        "o=u:low:vowel".into(),
        "r=rr:high:consonant".into(),
        "ñ=n:high:consonant".into(),
        "b=v:medium:consonant".into(),
        "c=s:medium:consonant".into(),
        "z=s:medium:consonant".into(),
        "j=h:low:consonant".into(),
        "g=j:low:consonant".into(),
        "ll=y:low:consonant".into(),
    ]
}

static COMMON_SPANISH_ERRORS: Lazy<ConfusionTable> =
    Lazy::new(|| ConfusionTable::from_rules(&spanish_default_confusion_rules()));

/// The default rule set as a shared lookup table.
pub fn common_spanish_errors() -> &'static ConfusionTable {
    &COMMON_SPANISH_ERRORS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_rule() {
        let t = ConfusionTable::from_rules(&["r=rr:high:consonant".to_string()]);
        let rule = t.get("rr", "r").expect("symmetric lookup");
        assert_eq!(rule.severity, Severity::High);
        assert_eq!(rule.kind, ErrorKind::ConsonantConfusion);
    }

    #[test]
    fn infers_kind_and_severity() {
        let t = ConfusionTable::from_rules(&["o=u".to_string(), "b=v".to_string()]);
        assert_eq!(t.get("o", "u").map(|r| r.kind), Some(ErrorKind::VowelConfusion));
        assert_eq!(t.get("b", "v").map(|r| r.kind), Some(ErrorKind::ConsonantConfusion));
        assert_eq!(t.get("b", "v").map(|r| r.severity), Some(Severity::Low));
    }

    #[test]
    fn skips_malformed_rules() {
        let rules: Vec<String> = ["", "b", "=v", "b=", "b=b", "b=v:urgent", "b=v:low:tone", "b=v:low:consonant:x"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(ConfusionTable::from_rules(&rules).is_empty());
    }

    #[test]
    fn duplicate_pairs_keep_first() {
        let t = ConfusionTable::from_rules(&["b=v:medium".to_string(), "v=b:high".to_string()]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("v", "b").map(|r| r.severity), Some(Severity::Medium));
    }

    #[test]
    fn default_table_has_every_rule() {
        let t = common_spanish_errors();
        assert_eq!(t.len(), spanish_default_confusion_rules().len());
        assert_eq!(t.get("n", "ñ").map(|r| r.severity), Some(Severity::High));
        assert_eq!(t.get("s", "c").map(|r| r.severity), Some(Severity::Medium));
        assert_eq!(t.get("a", "e").map(|r| r.kind), Some(ErrorKind::VowelConfusion));
    }
}
