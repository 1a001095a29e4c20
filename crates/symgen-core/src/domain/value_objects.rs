//! Domain value objects: QuestionKind, Choice, GeneratorId.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! hold no evaluation logic; visibility and routing live in `condition.rs`
//! and `entities/`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── QuestionKind ─────────────────────────────────────────────────────────────

/// How a question collects its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Any non-empty string.
    FreeText,
    /// Exactly one value out of the declared choices.
    SingleChoice,
}

impl QuestionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FreeText => "free-text",
            Self::SingleChoice => "single-choice",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free-text" | "input" | "text" => Ok(Self::FreeText),
            "single-choice" | "list" | "select" => Ok(Self::SingleChoice),
            other => Err(DomainError::InvalidCatalog(format!(
                "unknown question kind: {other}"
            ))),
        }
    }
}

// ── Choice ───────────────────────────────────────────────────────────────────

/// One selectable entry of a single-choice question.
///
/// `label` is what the user sees; `value` is what lands in the answer set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.value)
    }
}

// ── GeneratorId ──────────────────────────────────────────────────────────────

/// Identifier of a downstream generator, e.g. `java-generator`.
///
/// Invariant: non-empty, lowercase ASCII alphanumerics and `-`, not starting
/// or ending with `-`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeneratorId(String);

impl GeneratorId {
    /// Parse and validate a generator id.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let invalid = |reason: &str| DomainError::InvalidGeneratorId {
            id: id.clone(),
            reason: reason.into(),
        };

        if id.is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if id.starts_with('-') || id.ends_with('-') {
            return Err(invalid("id cannot start or end with '-'"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid("only lowercase letters, digits and '-' are allowed"));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GeneratorId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GeneratorId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<GeneratorId> for String {
    fn from(id: GeneratorId) -> Self {
        id.0
    }
}
