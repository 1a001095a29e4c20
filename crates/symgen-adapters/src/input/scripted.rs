//! Fixed answers, for non-interactive runs and tests.

use std::collections::HashMap;

use tracing::debug;

use symgen_core::{
    application::ports::InputSource,
    domain::{AnswerSet, QuestionSpec},
    error::SymgenResult,
};

/// Answers questions from a key → value map.
///
/// A key missing from the map is answered by the fallback source when one is
/// set, otherwise with empty input so the question's default applies.
pub struct ScriptedInput {
    answers: HashMap<String, String>,
    fallback: Option<Box<dyn InputSource>>,
}

impl ScriptedInput {
    pub fn new<K, V>(answers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback: None,
        }
    }

    /// Ask `fallback` for anything not scripted.
    pub fn with_fallback(mut self, fallback: Box<dyn InputSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Scripted keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.answers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl InputSource for ScriptedInput {
    fn ask(&self, question: &QuestionSpec, answers: &AnswerSet) -> SymgenResult<String> {
        if let Some(value) = self.answers.get(question.key()) {
            debug!(key = question.key(), "scripted answer");
            return Ok(value.clone());
        }

        match &self.fallback {
            Some(fallback) => fallback.ask(question, answers),
            None => Ok(String::new()),
        }
    }
}
