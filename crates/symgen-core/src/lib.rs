//! Symgen Core - conditional question resolution and generator dispatch
//!
//! This crate provides the domain and application layers for the symgen
//! project wizard, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           symgen-cli (CLI)              │
//! │   (prompts, config, output, logging)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (QuestionResolver, DispatchRouter,      │
//! │  WizardService)                         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (InputSource, GeneratorInvoker,         │
//! │  Diagnostics, WorkspaceProbe)           │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     symgen-adapters (Infrastructure)    │
//! │ (ScriptedInput, CommandInvoker, ...)    │
//! └─────────────────────────────────────────┘
//!
//!        Domain Layer (pure, no I/O): QuestionSpec, Condition,
//!        AnswerSet, RoutingRule, WizardCatalog
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use symgen_core::prelude::*;
//!
//! # fn demo(
//! #     input: Box<dyn InputSource>,
//! #     workspace: Box<dyn WorkspaceProbe>,
//! #     diagnostics: Box<dyn Diagnostics>,
//! # ) -> SymgenResult<()> {
//! let catalog = WizardCatalog::new(
//!     "demo",
//!     vec![QuestionSpec::free_text("name", "Project name").with_default("demo")],
//!     vec![RoutingRule::catch_all(GeneratorId::parse("demo-generator")?)],
//! )?;
//!
//! let service = WizardService::new(catalog, input, workspace, diagnostics);
//! let decision = service.plan(Path::new("."))?;
//! println!("{} <- {}", decision.target, decision.parameters);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        ApplicationError, DispatchRouter, QuestionResolver, WizardService,
        ports::{Diagnostics, GeneratorInvoker, InputSource, WorkspaceProbe},
    };
    pub use crate::domain::{
        AnswerSet, Choice, Condition, DispatchDecision, DomainError, GeneratorId, QuestionKind,
        QuestionSpec, RoutingRule, WizardCatalog,
    };
    pub use crate::error::{SymgenError, SymgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
