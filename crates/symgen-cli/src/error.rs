//! Error handling for the symgen CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use symgen_adapters::CatalogLoadError;
use symgen_core::error::SymgenError;

pub use symgen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `--answer` named a key the catalog does not ask.
    #[error("Unknown question '{key}'")]
    UnknownQuestion { key: String, known: Vec<String> },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config get` named a key the configuration does not have.
    #[error("Unknown configuration key '{key}'")]
    UnknownConfigKey { key: String },

    /// A catalog file could not be found, read, parsed, or validated.
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `symgen-core` or its adapters.
    #[error("Wizard failed: {0}")]
    Core(#[from] SymgenError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A file would be overwritten without `--force`.
    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    /// Feature not available (e.g., interactive mode without feature flag).
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::UnknownQuestion { key, known } => vec![
                format!("'{}' is not a question of the active catalog", key),
                format!("Known questions: {}", known.join(", ")),
                "List them with: symgen questions".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'symgen init' to create a default config".into(),
            ],

            Self::UnknownConfigKey { .. } => vec![
                "Show every key with: symgen config list".into(),
                "Keys are dotted paths, e.g. output.format or defaults.host".into(),
            ],

            Self::Catalog(CatalogLoadError::NotFound { path }) => vec![
                format!("No catalog at {}", path.display()),
                "Check --catalog, catalog.path and $SYMGEN_CATALOG".into(),
                "Write the built-in catalog with: symgen init --catalog".into(),
            ],
            Self::Catalog(CatalogLoadError::Invalid { source, .. }) => source.suggestions(),
            Self::Catalog(_) => vec![
                "Check the catalog file syntax".into(),
                "Validate it with: symgen check --catalog <FILE>".into(),
            ],

            Self::Core(core_err) => {
                let mut suggestions = core_err.suggestions();
                if let Some(answers) = core_err.unrouted_answers() {
                    suggestions.push(format!("Answers: {answers}"));
                }
                suggestions
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::AlreadyExists { .. } => vec!["Use --force to overwrite".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                format!(
                    "Install with the feature enabled: cargo install symgen-cli --features {}",
                    feature
                ),
                "Or pass every answer with --answer and --non-interactive".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::UnknownQuestion { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::Catalog(CatalogLoadError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Catalog(CatalogLoadError::Read { .. }) => ErrorCategory::Internal,
            Self::Catalog(_) => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Input => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::AlreadyExists { .. } => ErrorCategory::UserError,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, cancelled wizard).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error, including catalogs and generator mappings.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use symgen_core::{
        application::ApplicationError,
        domain::{AnswerSet, DomainError},
    };

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn missing_answer_is_user_error() {
        let err = CliError::from(SymgenError::from(ApplicationError::InputUnavailable {
            key: "application".into(),
            reason: "no terminal".into(),
        }));
        assert_eq!(err.exit_code(), 2);
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("--answer application="))
        );
    }

    #[test]
    fn cancelled_wizard_is_user_error() {
        let err = CliError::from(SymgenError::from(ApplicationError::Cancelled {
            key: "language".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_catalog_is_not_found() {
        let err = CliError::from(CatalogLoadError::NotFound {
            path: PathBuf::from("/nope.toml"),
        });
        assert_eq!(err.exit_code(), 3);
        assert!(err.suggestions().iter().any(|s| s.contains("init --catalog")));
    }

    #[test]
    fn invalid_catalog_is_configuration() {
        let err = CliError::from(CatalogLoadError::Invalid {
            path: PathBuf::from("c.toml"),
            source: DomainError::MissingRules,
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unrouted_answers_are_suggested() {
        let answers: AnswerSet = [("application", "mystery")].into_iter().collect();
        let err = CliError::from(SymgenError::from(DomainError::NoRouteMatched { answers }));
        assert_eq!(err.exit_code(), 4);
        assert!(err.suggestions().iter().any(|s| s.contains("mystery")));
    }

    #[test]
    fn generator_failure_is_internal() {
        let err = CliError::from(SymgenError::from(ApplicationError::GeneratorFailed {
            target: "java-generator".into(),
            reason: "exited with 1".into(),
        }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_question_lists_known_keys() {
        let err = CliError::UnknownQuestion {
            key: "colour".into(),
            known: vec!["host".into(), "application".into()],
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("host, application")));
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::AlreadyExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err: CliResult<()> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing")).with_cli_context(|| "reading");
        let s = err.unwrap_err().format_plain(true);
        assert!(s.contains("Caused by: missing"));
        assert!(!s.contains("--verbose"));
    }
}
