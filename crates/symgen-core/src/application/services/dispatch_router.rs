//! Dispatch Router - maps a finished answer set to one generator.
//!
//! A pure function of its inputs: no ports, no state. The same answer set and
//! rule list always produce the same decision.

use tracing::{debug, instrument, warn};

use crate::{
    domain::{AnswerSet, DispatchDecision, DomainError, RoutingRule, first_match},
    error::{SymgenError, SymgenResult},
};

/// Selects the first matching routing rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchRouter;

impl DispatchRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route `answers` through `rules`, first match wins.
    ///
    /// The answer set is moved into the decision unchanged; rules never filter
    /// or rewrite parameters.
    ///
    /// # Errors
    ///
    /// `NoRouteMatched` carrying the full answer set when no rule matches.
    #[instrument(skip_all, fields(rules = rules.len(), answers = answers.len()))]
    pub fn route(
        &self,
        answers: AnswerSet,
        rules: &[RoutingRule],
    ) -> SymgenResult<DispatchDecision> {
        match first_match(answers, rules) {
            Ok(decision) => {
                debug!(target_id = %decision.target, "route selected");
                Ok(decision)
            }
            Err(DomainError::NoRouteMatched { answers }) => {
                warn!(answers = %answers, "no routing rule matched");
                Err(SymgenError::Domain(DomainError::NoRouteMatched { answers }))
            }
            Err(other) => Err(other.into()),
        }
    }
}
