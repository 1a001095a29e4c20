use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Answers collected during one wizard run, keyed by question key.
///
/// Invariant: append-only. Once a key is recorded it is never removed or
/// overwritten; [`AnswerSet::record`] rejects a second write to the same key.
/// Iteration order is the key order, so equal sets always display and
/// serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AnswerAlreadySet`] if `key` already has an answer.
    pub fn record(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let key = key.into();
        if self.answers.contains_key(&key) {
            return Err(DomainError::AnswerAlreadySet { key });
        }
        self.answers.insert(key, value.into());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.answers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.answers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this set containing only the given keys.
    pub fn restricted_to<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> Self {
        let answers = keys
            .into_iter()
            .filter_map(|k| self.answers.get_key_value(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { answers }
    }
}

/// Builds a set from pairs. The first value seen for a key wins; later
/// duplicates are ignored rather than overwriting it.
impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = BTreeMap::new();
        for (k, v) in iter {
            answers.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { answers }
    }
}

impl fmt::Display for AnswerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.answers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: \"{v}\"")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_overwrite() {
        let mut answers = AnswerSet::new();
        answers.record("language", "java").unwrap();

        let err = answers.record("language", "python").unwrap_err();
        assert_eq!(
            err,
            DomainError::AnswerAlreadySet {
                key: "language".into()
            }
        );
        assert_eq!(answers.get("language"), Some("java"));
    }

    #[test]
    fn from_iter_keeps_first_value() {
        let answers: AnswerSet = [("host", "a"), ("host", "b")].into_iter().collect();
        assert_eq!(answers.get("host"), Some("a"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn display_is_key_ordered() {
        let answers: AnswerSet = [("language", "java"), ("application", "bot-app")]
            .into_iter()
            .collect();
        assert_eq!(
            answers.to_string(),
            "{application: \"bot-app\", language: \"java\"}"
        );
    }

    #[test]
    fn restricted_to_drops_other_keys() {
        let answers: AnswerSet = [("host", "h"), ("application", "ext-app"), ("appId", "x")]
            .into_iter()
            .collect();
        let prefix = answers.restricted_to(["host", "application", "missing"]);
        assert_eq!(prefix.len(), 2);
        assert!(!prefix.contains("appId"));
    }
}
