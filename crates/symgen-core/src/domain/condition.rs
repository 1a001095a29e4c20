//! Inspectable predicates over an [`AnswerSet`].
//!
//! Visibility and routing predicates are data, not closures. Because every
//! variant names the answer keys it reads, a catalog can check at
//! construction time that a predicate never looks at an answer that cannot
//! exist yet, and can enumerate every reachable combination of answers.
//!
//! # Missing keys
//!
//! A key that has no answer (its question was skipped) compares unequal to
//! every literal and contains nothing:
//!
//! | variant        | key missing |
//! |----------------|-------------|
//! | `equals`       | false       |
//! | `not-equals`   | true        |
//! | `contains`     | false       |
//! | `not-contains` | true        |
//! | `present`      | false       |
//! | `absent`       | true        |
//!
//! # Catalog syntax
//!
//! ```toml
//! when = { equals = { key = "application", value = "bot-app" } }
//! when = { all = [
//!     { equals = { key = "application", value = "ext-app-bdk" } },
//!     { not-equals = { key = "host", value = "develop2.symphony.com" } },
//! ] }
//! when = "always"
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::answer_set::AnswerSet;

/// A predicate over the answers collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    /// Always true. Used as a catch-all routing rule.
    Always,
    Equals { key: String, value: String },
    NotEquals { key: String, value: String },
    /// The answer contains `value` as a substring.
    Contains { key: String, value: String },
    NotContains { key: String, value: String },
    Present { key: String },
    Absent { key: String },
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn contains(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Contains {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn not_contains(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotContains {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn present(key: impl Into<String>) -> Self {
        Self::Present { key: key.into() }
    }

    pub fn absent(key: impl Into<String>) -> Self {
        Self::Absent { key: key.into() }
    }

    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    pub fn negate(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Combine with `other` so both must hold.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            this => Self::All(vec![this, other]),
        }
    }

    /// Combine with `other` so either may hold.
    pub fn or(self, other: Condition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            this => Self::Any(vec![this, other]),
        }
    }

    /// Evaluate against the answers collected so far.
    pub fn evaluate(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::Always => true,
            Self::Equals { key, value } => answers.get(key) == Some(value.as_str()),
            Self::NotEquals { key, value } => answers.get(key) != Some(value.as_str()),
            Self::Contains { key, value } => answers
                .get(key)
                .is_some_and(|answer| answer.contains(value.as_str())),
            Self::NotContains { key, value } => !answers
                .get(key)
                .is_some_and(|answer| answer.contains(value.as_str())),
            Self::Present { key } => answers.contains(key),
            Self::Absent { key } => !answers.contains(key),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(answers)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(answers)),
            Self::Not(condition) => !condition.evaluate(answers),
        }
    }

    /// Every answer key this condition reads.
    pub fn referenced_keys(&self) -> BTreeSet<&str> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut BTreeSet<&'a str>) {
        match self {
            Self::Always => {}
            Self::Equals { key, .. }
            | Self::NotEquals { key, .. }
            | Self::Contains { key, .. }
            | Self::NotContains { key, .. }
            | Self::Present { key }
            | Self::Absent { key } => {
                keys.insert(key.as_str());
            }
            Self::All(conditions) | Self::Any(conditions) => {
                for c in conditions {
                    c.collect_keys(keys);
                }
            }
            Self::Not(condition) => condition.collect_keys(keys),
        }
    }

    /// Literal values this condition compares `key` against.
    pub fn literals_for<'a>(&'a self, key: &str, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Equals { key: k, value }
            | Self::NotEquals { key: k, value }
            | Self::Contains { key: k, value }
            | Self::NotContains { key: k, value }
                if k == key =>
            {
                out.insert(value.as_str());
            }
            Self::All(conditions) | Self::Any(conditions) => {
                for c in conditions {
                    c.literals_for(key, out);
                }
            }
            Self::Not(condition) => condition.literals_for(key, out),
            _ => {}
        }
    }

    /// Literals this condition tests `key` for as substrings.
    pub fn contained_literals_for<'a>(&'a self, key: &str, out: &mut BTreeSet<&'a str>) {
        match self {
            Self::Contains { key: k, value } | Self::NotContains { key: k, value } if k == key => {
                out.insert(value.as_str());
            }
            Self::All(conditions) | Self::Any(conditions) => {
                for c in conditions {
                    c.contained_literals_for(key, out);
                }
            }
            Self::Not(condition) => condition.contained_literals_for(key, out),
            _ => {}
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, conditions: &[Condition], op: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, c) in conditions.iter().enumerate() {
                if i > 0 {
                    write!(f, " {op} ")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::Always => f.write_str("always"),
            Self::Equals { key, value } => write!(f, "{key} == \"{value}\""),
            Self::NotEquals { key, value } => write!(f, "{key} != \"{value}\""),
            Self::Contains { key, value } => write!(f, "{key} contains \"{value}\""),
            Self::NotContains { key, value } => write!(f, "{key} does not contain \"{value}\""),
            Self::Present { key } => write!(f, "{key} is answered"),
            Self::Absent { key } => write!(f, "{key} is not answered"),
            Self::All(conditions) => join(f, conditions, "and"),
            Self::Any(conditions) => join(f, conditions, "or"),
            Self::Not(condition) => write!(f, "not {condition}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn missing_key_semantics() {
        let empty = AnswerSet::new();
        assert!(!Condition::equals("language", "java").evaluate(&empty));
        assert!(Condition::not_equals("language", "java").evaluate(&empty));
        assert!(!Condition::contains("application", "ext-app").evaluate(&empty));
        assert!(Condition::not_contains("application", "ext-app").evaluate(&empty));
        assert!(!Condition::present("language").evaluate(&empty));
        assert!(Condition::absent("language").evaluate(&empty));
    }

    #[test]
    fn not_contains_matches_substring_like_index_of() {
        let username_visible = Condition::not_contains("application", "ext-app");
        assert!(username_visible.evaluate(&answers(&[("application", "bot-app")])));
        assert!(username_visible.evaluate(&answers(&[("application", "workflow")])));
        assert!(!username_visible.evaluate(&answers(&[("application", "ext-app")])));
        assert!(!username_visible.evaluate(&answers(&[("application", "ext-app-bdk")])));
    }

    #[test]
    fn combinators() {
        let app_id_visible = Condition::equals("application", "ext-app").or(Condition::equals(
            "application",
            "ext-app-bdk",
        )
        .and(Condition::not_equals("host", "develop2.symphony.com")));

        assert!(app_id_visible.evaluate(&answers(&[("application", "ext-app")])));
        assert!(app_id_visible.evaluate(&answers(&[
            ("application", "ext-app-bdk"),
            ("host", "acme.symphony.com")
        ])));
        assert!(!app_id_visible.evaluate(&answers(&[
            ("application", "ext-app-bdk"),
            ("host", "develop2.symphony.com")
        ])));
        assert!(!Condition::negate(Condition::Always).evaluate(&AnswerSet::new()));
    }

    #[test]
    fn referenced_keys_walks_nested_conditions() {
        let condition = Condition::all([
            Condition::equals("application", "bot-app"),
            Condition::negate(Condition::any([
                Condition::present("language"),
                Condition::Always,
            ])),
        ]);
        let keys: Vec<_> = condition.referenced_keys().into_iter().collect();
        assert_eq!(keys, vec!["application", "language"]);
    }

    #[test]
    fn literals_for_only_collects_matching_key() {
        let condition = Condition::equals("host", "a").and(Condition::equals("application", "b"));
        let mut out = BTreeSet::new();
        condition.literals_for("host", &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn contained_literals_skip_equality_tests() {
        let condition = Condition::equals("name", "exact")
            .and(Condition::negate(Condition::contains("name", "bot")))
            .or(Condition::not_contains("name", "app"));
        let mut out = BTreeSet::new();
        condition.contained_literals_for("name", &mut out);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), vec!["app", "bot"]);
    }

    #[test]
    fn display_reads_naturally() {
        let condition = Condition::equals("application", "bot-app")
            .and(Condition::equals("language", "java"));
        assert_eq!(
            condition.to_string(),
            "(application == \"bot-app\" and language == \"java\")"
        );
    }

    #[test]
    fn deserializes_from_json_shape() {
        let parsed: Condition = serde_json::from_str(
            r#"{"any":[{"equals":{"key":"a","value":"x"}},"always"]}"#,
        )
        .unwrap();
        assert_eq!(
            parsed,
            Condition::any([Condition::equals("a", "x"), Condition::Always])
        );
    }
}
