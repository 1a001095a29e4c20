//! Routing rules and the decision they produce.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DomainError, condition::Condition, entities::answer_set::AnswerSet, value_objects::GeneratorId,
};

/// Predicate-to-target mapping used to select the downstream generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub target: GeneratorId,
    pub when: Condition,
}

impl RoutingRule {
    pub fn new(target: GeneratorId, when: Condition) -> Self {
        Self { target, when }
    }

    /// A rule that matches every answer set.
    pub fn catch_all(target: GeneratorId) -> Self {
        Self::new(target, Condition::Always)
    }

    pub fn matches(&self, answers: &AnswerSet) -> bool {
        self.when.evaluate(answers)
    }
}

/// Final output: the chosen generator plus the full answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchDecision {
    pub target: GeneratorId,
    pub parameters: AnswerSet,
}

/// Return the decision of the first rule matching `answers`.
///
/// Rules are tried strictly in order and evaluation stops at the first match.
/// The whole answer set is forwarded untouched.
///
/// # Errors
///
/// [`DomainError::NoRouteMatched`] carrying `answers` when no rule matches.
pub fn first_match(answers: AnswerSet, rules: &[RoutingRule]) -> Result<DispatchDecision, DomainError> {
    match rules.iter().find(|rule| rule.matches(&answers)) {
        Some(rule) => Ok(DispatchDecision {
            target: rule.target.clone(),
            parameters: answers,
        }),
        None => Err(DomainError::NoRouteMatched { answers }),
    }
}
