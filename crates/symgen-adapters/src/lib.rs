//! Infrastructure adapters for symgen.
//!
//! This crate implements the ports defined in `symgen-core::application::ports`
//! and ships the built-in catalog. It contains the file, process and
//! environment access the core stays free of.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod diagnostics;
pub mod generator;
pub mod input;
pub mod workspace;

// Re-export commonly used adapters
pub use builtin_catalog::{CatalogSource, discover_catalog, symphony_catalog};
pub use catalog_loader::{CatalogLoadError, FilesystemCatalogLoader};
pub use diagnostics::{CollectingDiagnostics, TracingDiagnostics};
pub use generator::{CommandInvoker, GeneratorCommand, RecordingInvoker};
pub use input::ScriptedInput;
pub use workspace::{LocalWorkspace, MemoryWorkspace};
