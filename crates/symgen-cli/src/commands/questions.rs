//! `symgen questions` - show the question graph of the active catalog.

use symgen_core::domain::{QuestionKind, QuestionSpec};

use crate::{
    cli::{ListFormat, QuestionsArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: QuestionsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, source) = super::load_catalog(&args.catalog, &config)?;
    let questions = catalog.questions();

    // The global --output-format json wins over --format.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Json => output.json(&questions)?,
        ListFormat::List => {
            for question in questions {
                output.print(question.key())?;
            }
        }
        ListFormat::Table => {
            output.header(&format!(
                "Catalog '{}' ({source}), {} questions:",
                catalog.name(),
                questions.len()
            ))?;
            output.print("")?;
            for line in table(questions) {
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

/// Render the questions as aligned columns.
fn table(questions: &[QuestionSpec]) -> Vec<String> {
    let rows: Vec<[String; 5]> = questions
        .iter()
        .map(|q| {
            [
                q.key().to_string(),
                q.kind().to_string(),
                q.default_value().unwrap_or("-").to_string(),
                q.condition()
                    .map_or_else(|| "always".to_string(), ToString::to_string),
                answers(q),
            ]
        })
        .collect();

    let header = ["KEY", "KIND", "DEFAULT", "ASKED WHEN", "ANSWERS"].map(String::from);
    let mut widths = header.clone().map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(&rows)
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i + 1 == row.len() {
                    line.push_str(cell);
                } else {
                    line.push_str(&format!("{cell:<width$}  ", width = widths[i]));
                }
            }
            line
        })
        .collect()
}

fn answers(question: &QuestionSpec) -> String {
    match question.kind() {
        QuestionKind::FreeText => "text".into(),
        QuestionKind::SingleChoice => question
            .choices()
            .iter()
            .map(|c| c.value.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
    }
}
