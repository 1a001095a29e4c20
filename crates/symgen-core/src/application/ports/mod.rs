//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `symgen-adapters` (and the CLI)
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `InputSource`: answers for visible questions
//!   - `GeneratorInvoker`: receives the final dispatch decision
//!   - `Diagnostics`: fire-and-forget status and warning lines
//!   - `WorkspaceProbe`: inspects the destination folder
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Diagnostics, GeneratorInvoker, InputSource, WorkspaceProbe};

#[cfg(test)]
pub use output::MockInputSource;
