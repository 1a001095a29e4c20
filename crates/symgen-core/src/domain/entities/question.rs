//! Question declarations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError,
    condition::Condition,
    entities::answer_set::AnswerSet,
    value_objects::{Choice, QuestionKind},
};

/// Static declaration of one prompt, including its conditional visibility.
///
/// Immutable once the catalog holding it has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    key: String,
    kind: QuestionKind,
    prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    /// `None` means the question is always asked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    when: Option<Condition>,
}

impl QuestionSpec {
    /// A free-text question.
    pub fn free_text(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: QuestionKind::FreeText,
            prompt: prompt.into(),
            choices: Vec::new(),
            default: None,
            when: None,
        }
    }

    /// A single-choice question over `choices`, in display order.
    pub fn single_choice(
        key: impl Into<String>,
        prompt: impl Into<String>,
        choices: impl IntoIterator<Item = Choice>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: QuestionKind::SingleChoice,
            prompt: prompt.into(),
            choices: choices.into_iter().collect(),
            default: None,
            when: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Only ask this question when `condition` holds.
    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.when.as_ref()
    }

    /// Position of the default in `choices`, if it is one.
    pub fn default_index(&self) -> Option<usize> {
        let default = self.default.as_deref()?;
        self.choices.iter().position(|c| c.value == default)
    }

    /// Whether the question is asked given the answers collected so far.
    pub fn is_visible(&self, answers: &AnswerSet) -> bool {
        self.when.as_ref().is_none_or(|c| c.evaluate(answers))
    }

    /// Normalise a raw answer against this question's constraint.
    ///
    /// Empty input (after trimming) falls back to the default. A free-text
    /// answer must end up non-empty; a single-choice answer must be one of
    /// the choice values. Returns the rejection reason otherwise.
    pub fn accept(&self, raw: &str) -> Result<String, String> {
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            match self.default.as_deref() {
                Some(default) => default,
                None => return Err("no answer given and the question has no default".into()),
            }
        } else {
            trimmed
        };

        match self.kind {
            QuestionKind::FreeText => Ok(value.to_string()),
            QuestionKind::SingleChoice => {
                if self.choices.iter().any(|c| c.value == value) {
                    Ok(value.to_string())
                } else {
                    let allowed: Vec<&str> = self.choices.iter().map(|c| c.value.as_str()).collect();
                    Err(format!(
                        "'{value}' is not one of: {}",
                        allowed.join(", ")
                    ))
                }
            }
        }
    }

    /// Replace the default, returning the re-validated question.
    pub(crate) fn override_default(mut self, default: String) -> Result<Self, DomainError> {
        self.default = Some(default);
        self.validate()?;
        Ok(self)
    }

    /// Validate this declaration in isolation.
    ///
    /// Cross-question checks (unique keys, prefix consistency) live in the
    /// catalog.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_key(&self.key)?;

        match self.kind {
            QuestionKind::FreeText => {
                if !self.choices.is_empty() {
                    return Err(DomainError::UnexpectedChoices {
                        key: self.key.clone(),
                    });
                }
                if self.default.as_deref().is_some_and(|d| d.trim().is_empty()) {
                    return Err(DomainError::BlankDefault {
                        key: self.key.clone(),
                    });
                }
            }
            QuestionKind::SingleChoice => {
                if self.choices.is_empty() {
                    return Err(DomainError::MissingChoices {
                        key: self.key.clone(),
                    });
                }

                let mut seen = HashSet::new();
                for choice in &self.choices {
                    if !seen.insert(choice.value.as_str()) {
                        return Err(DomainError::DuplicateChoice {
                            key: self.key.clone(),
                            value: choice.value.clone(),
                        });
                    }
                }

                if let Some(default) = &self.default {
                    if !seen.contains(default.as_str()) {
                        return Err(DomainError::DefaultNotAChoice {
                            key: self.key.clone(),
                            default: default.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidQuestionKey {
        key: key.to_string(),
        reason: reason.into(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("only letters, digits, '_' and '-' are allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language() -> QuestionSpec {
        QuestionSpec::single_choice(
            "language",
            "Select your programing language",
            [Choice::new("Java", "java"), Choice::new("Python", "python")],
        )
    }

    #[test]
    fn free_text_empty_input_uses_default() {
        let q = QuestionSpec::free_text("username", "Enter your bot username").with_default("my-bot");
        assert_eq!(q.accept("   ").unwrap(), "my-bot");
        assert_eq!(q.accept(" alice ").unwrap(), "alice");
    }

    #[test]
    fn free_text_without_default_rejects_empty() {
        let q = QuestionSpec::free_text("name", "Name");
        assert!(q.accept("").is_err());
    }

    #[test]
    fn single_choice_accepts_only_values() {
        let q = language();
        assert_eq!(q.accept("python").unwrap(), "python");
        assert!(q.accept("Java").is_err());
        assert!(q.accept("").is_err());
    }

    #[test]
    fn single_choice_default_is_preselected() {
        let q = language().with_default("python");
        assert_eq!(q.default_index(), Some(1));
        assert_eq!(q.accept("").unwrap(), "python");
        assert_eq!(q.accept("java").unwrap(), "java");
    }

    #[test]
    fn absent_condition_is_always_visible() {
        assert!(language().is_visible(&AnswerSet::new()));
        let gated = language().when(Condition::equals("application", "bot-app"));
        assert!(!gated.is_visible(&AnswerSet::new()));
    }

    #[test]
    fn validate_rejects_bad_declarations() {
        assert!(matches!(
            QuestionSpec::free_text("", "x").validate(),
            Err(DomainError::InvalidQuestionKey { .. })
        ));
        assert!(matches!(
            QuestionSpec::single_choice("a", "x", []).validate(),
            Err(DomainError::MissingChoices { .. })
        ));
        assert!(matches!(
            language().with_default("go").validate(),
            Err(DomainError::DefaultNotAChoice { .. })
        ));
        assert!(matches!(
            QuestionSpec::single_choice("a", "x", [Choice::new("A", "a"), Choice::new("B", "a")])
                .validate(),
            Err(DomainError::DuplicateChoice { .. })
        ));
    }

    #[test]
    fn free_text_default_must_not_be_blank() {
        for blank in ["", "   "] {
            assert_eq!(
                QuestionSpec::free_text("name", "Name").with_default(blank).validate(),
                Err(DomainError::BlankDefault { key: "name".into() })
            );
        }

        let overridden = QuestionSpec::free_text("name", "Name")
            .with_default("demo")
            .override_default(" ".into());
        assert!(matches!(overridden, Err(DomainError::BlankDefault { .. })));
    }
}
