//! Question Resolver - collects the answer set for one run.
//!
//! Questions are evaluated strictly in declaration order. Each visible
//! question blocks on the input source before the next one is considered,
//! because later visibility conditions read earlier answers.

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::InputSource},
    domain::{AnswerSet, QuestionSpec},
    error::{SymgenError, SymgenResult},
};

/// Resolves an ordered list of questions into an [`AnswerSet`].
pub struct QuestionResolver {
    input: Box<dyn InputSource>,
}

impl QuestionResolver {
    pub fn new(input: Box<dyn InputSource>) -> Self {
        Self { input }
    }

    /// Ask every visible question and return the collected answers.
    ///
    /// A question whose condition is false is skipped entirely: the input
    /// source is not called and no key is recorded.
    ///
    /// # Errors
    ///
    /// - `InputUnavailable` if the input source fails or its answer does not
    ///   satisfy the question (empty without a default, unknown choice).
    /// - `Cancelled` if the user aborted a prompt.
    ///
    /// On error nothing collected so far is returned.
    #[instrument(skip_all, fields(questions = questions.len()))]
    pub fn resolve(&self, questions: &[QuestionSpec]) -> SymgenResult<AnswerSet> {
        let mut answers = AnswerSet::new();

        for question in questions {
            if !question.is_visible(&answers) {
                debug!(key = question.key(), "question skipped");
                continue;
            }

            let raw = self.input.ask(question, &answers)?;
            let value = question
                .accept(&raw)
                .map_err(|reason| ApplicationError::InputUnavailable {
                    key: question.key().to_string(),
                    reason,
                })?;

            debug!(key = question.key(), value = %value, "question answered");
            answers.record(question.key(), value).map_err(SymgenError::Domain)?;
        }

        debug!(answered = answers.len(), "resolution complete");
        Ok(answers)
    }
}
