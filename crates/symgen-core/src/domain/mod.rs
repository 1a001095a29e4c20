// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for symgen.
//!
//! This module contains pure decision logic with no I/O. Prompting, folder
//! inspection and generator invocation are reached through ports defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or terminal access
//! - **No closures in data**: predicates are inspectable [`Condition`] values
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod condition;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use condition::Condition;
pub use entities::{
    answer_set::AnswerSet,
    catalog::{MAX_REACHABLE_SETS, WizardCatalog},
    question::QuestionSpec,
    routing::{DispatchDecision, RoutingRule, first_match},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Choice, GeneratorId, QuestionKind};

pub use validation::DomainValidator;
