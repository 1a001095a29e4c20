//! Application layer errors.
//!
//! These errors represent failures in orchestration, not decision logic.
//! Catalog and routing errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running the wizard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The input collaborator could not produce a conforming answer.
    #[error("No usable answer for '{key}': {reason}")]
    InputUnavailable { key: String, reason: String },

    /// The user aborted a prompt.
    #[error("Cancelled while answering '{key}'")]
    Cancelled { key: String },

    /// No generator command is mapped to the routed target.
    #[error("No generator configured for target '{target}'")]
    GeneratorNotConfigured { target: String },

    /// The generator ran but failed.
    #[error("Generator '{target}' failed: {reason}")]
    GeneratorFailed { target: String, reason: String },

    /// The destination folder could not be inspected.
    #[error("Cannot inspect {path}: {reason}")]
    WorkspaceError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InputUnavailable { key, .. } => vec![
                format!("Provide it up front: --answer {key}=<value>"),
                "Run in an interactive terminal to be prompted".into(),
            ],
            Self::Cancelled { .. } => vec![
                "The wizard was cancelled".into(),
                "No generator was invoked".into(),
            ],
            Self::GeneratorNotConfigured { target } => vec![
                format!("Add a [generators.{target}] section to your config"),
                "Or re-run with --dry-run to only print the decision".into(),
            ],
            Self::GeneratorFailed { .. } => vec![
                "Check the generator output above".into(),
                "Ensure the generator command is installed and in your PATH".into(),
            ],
            Self::WorkspaceError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the directory exists and is readable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputUnavailable { .. } | Self::Cancelled { .. } => ErrorCategory::Input,
            Self::GeneratorNotConfigured { .. } => ErrorCategory::Configuration,
            Self::GeneratorFailed { .. } | Self::WorkspaceError { .. } => ErrorCategory::Internal,
        }
    }
}
