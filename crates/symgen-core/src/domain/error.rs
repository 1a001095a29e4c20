// ============================================================================
// domain/error.rs - WIZARD DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::entities::answer_set::AnswerSet;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so callers can keep the original around for reporting)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Question graph configuration
    // ========================================================================
    #[error("Invalid question key '{key}': {reason}")]
    InvalidQuestionKey { key: String, reason: String },

    #[error("Question key '{key}' is declared more than once")]
    DuplicateQuestionKey { key: String },

    #[error("Single-choice question '{key}' declares no choices")]
    MissingChoices { key: String },

    #[error("Free-text question '{key}' must not declare choices")]
    UnexpectedChoices { key: String },

    #[error("Question '{key}' lists choice '{value}' more than once")]
    DuplicateChoice { key: String, value: String },

    #[error("Default '{default}' of question '{key}' is not one of its choices")]
    DefaultNotAChoice { key: String, default: String },

    #[error("Free-text question '{key}' has a blank default")]
    BlankDefault { key: String },

    #[error(
        "Visibility condition of question '{question}' reads '{referenced}', \
         which is not answered by an earlier question"
    )]
    ForwardReference {
        question: String,
        referenced: String,
    },

    #[error("Default override targets unknown question '{key}'")]
    UnknownDefaultOverride { key: String },

    // ========================================================================
    // Routing configuration
    // ========================================================================
    #[error("Routing rule for '{target}' reads unknown answer key '{referenced}'")]
    UnknownRuleKey { target: String, referenced: String },

    #[error("Catalog declares no routing rules")]
    MissingRules,

    #[error("Routing rules are not exhaustive: no rule matches {unmatched}")]
    NonExhaustiveRules { unmatched: AnswerSet },

    #[error("Catalog has more than {limit} reachable answer combinations")]
    TooManyCombinations { limit: usize },

    #[error("Invalid generator id '{id}': {reason}")]
    InvalidGeneratorId { id: String, reason: String },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // ========================================================================
    // Runtime invariants
    // ========================================================================
    #[error("No routing rule matched answers {answers}")]
    NoRouteMatched { answers: AnswerSet },

    #[error("Answer for '{key}' is already recorded")]
    AnswerAlreadySet { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ForwardReference {
                question,
                referenced,
            } => vec![
                format!("Move the question answering '{referenced}' before '{question}'"),
                "Visibility conditions may only read answers collected earlier".into(),
            ],
            Self::NonExhaustiveRules { unmatched } => vec![
                format!("Add a rule covering {unmatched}"),
                "Or end the rule list with a catch-all: when = \"always\"".into(),
                "Try: symgen check to list every reachable combination".into(),
            ],
            Self::NoRouteMatched { answers } => vec![
                format!("Unhandled combination: {answers}"),
                "This is a catalog configuration gap, not an input problem".into(),
                "Try: symgen check to list every reachable combination".into(),
            ],
            Self::DefaultNotAChoice { key, .. } | Self::MissingChoices { key } => vec![
                format!("Review the choices of question '{key}'"),
                "Try: symgen questions to inspect the question graph".into(),
            ],
            Self::TooManyCombinations { .. } => vec![
                "Gate questions behind visibility conditions, or split the catalog".into(),
                "Compare free-text answers against fewer literals".into(),
            ],
            Self::BlankDefault { key } => vec![
                format!("Give question '{key}' a non-empty default, or remove it"),
                "Without a default the question requires an answer".into(),
            ],
            Self::UnknownDefaultOverride { key } => vec![
                format!("Remove '{key}' from the [defaults] section of your config"),
                "Try: symgen questions to list valid question keys".into(),
            ],
            Self::InvalidCatalog(msg) => vec![
                "Check the catalog file syntax".into(),
                format!("Details: {msg}"),
            ],
            _ => vec!["Check the catalog definition".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoRouteMatched { .. } => ErrorCategory::Routing,
            Self::AnswerAlreadySet { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Routing,
    Internal,
}
