//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "collect the answers" or "route a run".

pub mod dispatch_router;
pub mod question_resolver;
pub mod wizard_service;

pub use dispatch_router::DispatchRouter;
pub use question_resolver::QuestionResolver;
pub use wizard_service::WizardService;
