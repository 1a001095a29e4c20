use std::{collections::HashSet, ops::ControlFlow};

use crate::domain::{
    entities::{
        catalog::WizardCatalog,
        question::QuestionSpec,
        routing::{RoutingRule, first_match},
    },
    error::DomainError,
};

/// Centralized domain validation.
///
/// All static checks over a question graph live here, not scattered across
/// entities. [`WizardCatalog::new`] runs them in order.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_question(question: &QuestionSpec) -> Result<(), DomainError> {
        question.validate()
    }

    /// Per-question checks, unique keys, and prefix consistency: a visibility
    /// condition may only read keys of questions declared before it.
    pub fn validate_questions(questions: &[QuestionSpec]) -> Result<(), DomainError> {
        let mut earlier: HashSet<&str> = HashSet::with_capacity(questions.len());

        for question in questions {
            Self::validate_question(question)?;

            if let Some(condition) = question.condition() {
                for referenced in condition.referenced_keys() {
                    if !earlier.contains(referenced) {
                        return Err(DomainError::ForwardReference {
                            question: question.key().to_string(),
                            referenced: referenced.to_string(),
                        });
                    }
                }
            }

            if !earlier.insert(question.key()) {
                return Err(DomainError::DuplicateQuestionKey {
                    key: question.key().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Every routing predicate must read keys some question can answer.
    pub fn validate_rules(
        rules: &[RoutingRule],
        questions: &[QuestionSpec],
    ) -> Result<(), DomainError> {
        if rules.is_empty() {
            return Err(DomainError::MissingRules);
        }

        let known: HashSet<&str> = questions.iter().map(QuestionSpec::key).collect();
        for rule in rules {
            for referenced in rule.when.referenced_keys() {
                if !known.contains(referenced) {
                    return Err(DomainError::UnknownRuleKey {
                        target: rule.target.to_string(),
                        referenced: referenced.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Every reachable answer set must match at least one rule.
    ///
    /// Answer sets are checked as they are enumerated; the first unmatched
    /// one is reported.
    pub fn validate_exhaustive(catalog: &WizardCatalog) -> Result<(), DomainError> {
        if catalog.rules().iter().any(|rule| rule.when.is_always()) {
            return Ok(());
        }

        let unmatched = catalog.walk_reachable(|answers| {
            match first_match(answers, catalog.rules()) {
                Err(DomainError::NoRouteMatched { answers }) => ControlFlow::Break(answers),
                _ => ControlFlow::Continue(()),
            }
        })?;

        match unmatched {
            Some(unmatched) => Err(DomainError::NonExhaustiveRules { unmatched }),
            None => Ok(()),
        }
    }
}
