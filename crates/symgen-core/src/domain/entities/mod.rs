pub mod answer_set;
pub mod catalog;
pub mod question;
pub mod routing;

pub use crate::domain::DomainError;
pub use answer_set::AnswerSet;
pub use catalog::WizardCatalog;
pub use question::QuestionSpec;
pub use routing::{DispatchDecision, RoutingRule};
