//! Application layer for symgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (QuestionResolver, DispatchRouter, WizardService)
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! decision rules itself. Visibility and routing live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{DispatchRouter, QuestionResolver, WizardService};

// Re-export port traits (for adapter implementation)
pub use ports::{Diagnostics, GeneratorInvoker, InputSource, WorkspaceProbe};

pub use error::ApplicationError;
