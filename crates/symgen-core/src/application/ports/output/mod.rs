//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `symgen-adapters` crate provides implementations; the CLI adds the
//! terminal-facing ones.

use std::path::Path;

use crate::domain::{AnswerSet, DispatchDecision, QuestionSpec};
use crate::error::SymgenResult;

/// Port for obtaining answers to visible questions.
///
/// Implemented by:
/// - `symgen_adapters::input::ScriptedInput` (fixed answers, non-interactive)
/// - `symgen_cli::prompt::DialoguerInput` (interactive terminal)
///
/// ## Contract
///
/// - Called only for questions whose visibility condition holds.
/// - Returns the raw answer; an empty string means "accept the default".
///   The resolver normalises and checks the value against the question.
/// - Fails with `ApplicationError::InputUnavailable` when no answer can be
///   obtained, or `ApplicationError::Cancelled` when the user aborts.
#[cfg_attr(test, mockall::automock)]
pub trait InputSource: Send + Sync {
    /// Ask `question`, given the answers collected so far.
    fn ask(&self, question: &QuestionSpec, answers: &AnswerSet) -> SymgenResult<String>;
}

/// Port receiving the final routing decision.
///
/// Implemented by:
/// - `symgen_adapters::generator::CommandInvoker` (external command per target)
/// - `symgen_adapters::generator::RecordingInvoker` (testing)
pub trait GeneratorInvoker: Send + Sync {
    /// Run the generator selected by `decision`.
    fn invoke(&self, decision: &DispatchDecision) -> SymgenResult<()>;
}

/// Port for human-readable status lines. Purely observational; it must never
/// influence a decision.
pub trait Diagnostics: Send + Sync {
    fn notice(&self, message: &str);

    fn warning(&self, message: &str);
}

/// Port for inspecting the destination folder.
///
/// Implemented by:
/// - `symgen_adapters::workspace::LocalWorkspace` (production)
/// - `symgen_adapters::workspace::MemoryWorkspace` (testing)
pub trait WorkspaceProbe: Send + Sync {
    /// Whether `root` has no entries. A missing folder counts as empty.
    fn is_empty(&self, root: &Path) -> SymgenResult<bool>;
}
