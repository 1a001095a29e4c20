//! Unified error handling for symgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for symgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymgenError {
    /// Errors from the domain layer (catalog configuration, routing gaps).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (input, generators, workspace).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SymgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in symgen".into(),
                "Please report this issue at: https://github.com/cosecruz/symgen/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Routing => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The answer set a routing failure carried, for diagnostics.
    pub fn unrouted_answers(&self) -> Option<&crate::domain::AnswerSet> {
        match self {
            Self::Domain(DomainError::NoRouteMatched { answers })
            | Self::Domain(DomainError::NonExhaustiveRules { unmatched: answers }) => Some(answers),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The user or the input source could not supply an answer.
    Input,
    /// Catalog, rule set, or generator mapping is wrong.
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SymgenResult<T> = Result<T, SymgenError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SymgenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SymgenResult<T> {
        self.map_err(|e| SymgenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnswerSet;

    #[test]
    fn input_unavailable_is_input_category() {
        let err: SymgenError = ApplicationError::InputUnavailable {
            key: "host".into(),
            reason: "eof".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.suggestions().iter().any(|s| s.contains("--answer host=")));
    }

    #[test]
    fn no_route_is_configuration_and_carries_answers() {
        let answers: AnswerSet = [("application", "mystery")].into_iter().collect();
        let err: SymgenError = DomainError::NoRouteMatched {
            answers: answers.clone(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.unrouted_answers(), Some(&answers));
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = result.context("reading").unwrap_err();
        assert!(matches!(err, SymgenError::Internal { .. }));
        assert!(err.to_string().contains("reading: boom"));
    }
}
