//! Terminal prompts backed by `dialoguer`.

use dialoguer::{Input, Select, theme::ColorfulTheme};
use tracing::debug;

use symgen_core::{
    application::{ApplicationError, ports::InputSource},
    domain::{AnswerSet, QuestionKind, QuestionSpec},
    error::{SymgenError, SymgenResult},
};

/// Asks questions on the controlling terminal.
///
/// Free-text questions show their default and accept an empty line for it;
/// without a default an empty line is asked again.
/// Single-choice questions open a selection list; `Esc` or `q` cancels the
/// wizard.
pub struct DialoguerInput {
    theme: ColorfulTheme,
}

impl DialoguerInput {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn free_text(&self, question: &QuestionSpec) -> SymgenResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question.prompt())
            .allow_empty(false);
        if let Some(default) = question.default_value() {
            input = input.default(default.to_string()).show_default(true);
        }

        input.interact_text().map_err(|e| unavailable(question, e))
    }

    fn single_choice(&self, question: &QuestionSpec) -> SymgenResult<String> {
        let labels: Vec<&str> = question.choices().iter().map(|c| c.label.as_str()).collect();

        let picked = Select::with_theme(&self.theme)
            .with_prompt(question.prompt())
            .items(&labels)
            .default(question.default_index().unwrap_or(0))
            .interact_opt()
            .map_err(|e| unavailable(question, e))?;

        match picked {
            Some(index) => Ok(question.choices()[index].value.clone()),
            None => Err(ApplicationError::Cancelled {
                key: question.key().to_string(),
            }
            .into()),
        }
    }
}

impl Default for DialoguerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for DialoguerInput {
    fn ask(&self, question: &QuestionSpec, _answers: &AnswerSet) -> SymgenResult<String> {
        if !console::user_attended() {
            return Err(ApplicationError::InputUnavailable {
                key: question.key().to_string(),
                reason: "stdout is not an interactive terminal".into(),
            }
            .into());
        }

        debug!(key = question.key(), "prompting");
        match question.kind() {
            QuestionKind::FreeText => self.free_text(question),
            QuestionKind::SingleChoice => self.single_choice(question),
        }
    }
}

fn unavailable(question: &QuestionSpec, e: dialoguer::Error) -> SymgenError {
    ApplicationError::InputUnavailable {
        key: question.key().to_string(),
        reason: e.to_string(),
    }
    .into()
}
