//! Implementation of the `symgen new` command.
//!
//! Responsibility: wire adapters into a `WizardService`, run it in the
//! destination folder, display the decision and hand it to the configured
//! generator. No question or routing logic lives here.

use std::{collections::HashSet, time::Duration};

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use symgen_adapters::{CommandInvoker, LocalWorkspace, ScriptedInput};
use symgen_core::{
    application::{WizardService, ports::GeneratorInvoker, ports::InputSource},
    domain::{AnswerSet, DispatchDecision, GeneratorId, WizardCatalog},
};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// JSON shape of a finished run.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    run_id: Uuid,
    decided_at: DateTime<Utc>,
    catalog: &'a str,
    target: &'a GeneratorId,
    parameters: &'a AnswerSet,
}

/// Execute the `symgen new` command.
///
/// 1. Resolve the catalog and check `--answer` keys against it
/// 2. Print the banner
/// 3. Run the wizard (workspace notice, questions, routing)
/// 4. Print the decision
/// 5. Invoke the generator unless `--dry-run` or none is configured
#[instrument(skip_all, fields(dir = %args.destination().display()))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, source) = super::load_catalog(&args.catalog, &config)?;
    check_answer_keys(&catalog, &args.answers)?;

    let root = args.destination();
    if !output.is_json() {
        banner(&output)?;
        output.field("Catalog", &source.to_string())?;
    }

    let catalog_name = catalog.name().to_string();
    let service = WizardService::new(
        catalog,
        build_input(&args)?,
        Box::new(LocalWorkspace::new()),
        Box::new(output.diagnostics()),
    );
    let decision = service.plan(&root)?;

    warn_unused_answers(&args.answers, &decision, &output)?;
    show_decision(&decision, &catalog_name, &output)?;

    if args.dry_run {
        output.info("Dry run: generator not invoked")?;
        return Ok(());
    }

    let commands = config.generator_commands();
    if !commands.contains_key(decision.target.as_str()) {
        output.warning(&format!(
            "No generator command configured for '{target}'; add a [generators.{target}] \
             section to your config to run it",
            target = decision.target
        ))?;
        return Ok(());
    }

    let invoker = CommandInvoker::new(&root).with_commands(commands);
    run_generator(&invoker, &decision, &output)?;

    info!(target_id = %decision.target, "generator finished");
    output.success(&format!(
        "{} finished in {}",
        decision.target,
        root.display()
    ))?;
    Ok(())
}

// ── Input wiring ──────────────────────────────────────────────────────────────

fn build_input(args: &NewArgs) -> CliResult<Box<dyn InputSource>> {
    let scripted = ScriptedInput::new(args.answers.iter().cloned());
    if args.non_interactive {
        debug!(answers = ?scripted.keys(), "non-interactive run");
        return Ok(Box::new(scripted));
    }
    with_prompts(scripted)
}

#[cfg(feature = "interactive")]
fn with_prompts(scripted: ScriptedInput) -> CliResult<Box<dyn InputSource>> {
    Ok(Box::new(scripted.with_fallback(Box::new(
        crate::prompt::DialoguerInput::new(),
    ))))
}

#[cfg(not(feature = "interactive"))]
fn with_prompts(_scripted: ScriptedInput) -> CliResult<Box<dyn InputSource>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Every `--answer` key must be a question of the catalog, given once.
fn check_answer_keys(catalog: &WizardCatalog, answers: &[(String, String)]) -> CliResult<()> {
    let mut seen = HashSet::with_capacity(answers.len());
    for (key, _) in answers {
        if !seen.insert(key.as_str()) {
            return Err(CliError::InvalidInput {
                message: format!("--answer {key} is given more than once"),
                source: None,
            });
        }
        if catalog.question(key).is_none() {
            return Err(CliError::UnknownQuestion {
                key: key.clone(),
                known: catalog
                    .questions()
                    .iter()
                    .map(|q| q.key().to_string())
                    .collect(),
            });
        }
    }
    Ok(())
}

fn warn_unused_answers(
    answers: &[(String, String)],
    decision: &DispatchDecision,
    output: &OutputManager,
) -> CliResult<()> {
    for (key, _) in answers {
        if !decision.parameters.contains(key) {
            output.warning(&format!(
                "--answer {key} was ignored: the question was not asked"
            ))?;
        }
    }
    Ok(())
}

// ── Display ───────────────────────────────────────────────────────────────────

fn banner(output: &OutputManager) -> CliResult<()> {
    output.header("symgen")?;
    output.print("\thttps://developers.symphony.com")?;
    output.print(&format!(
        "Welcome to Symphony Generator v{}",
        symgen_core::VERSION
    ))?;
    Ok(())
}

fn show_decision(
    decision: &DispatchDecision,
    catalog: &str,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(&RunReport {
            run_id: Uuid::new_v4(),
            decided_at: Utc::now(),
            catalog,
            target: &decision.target,
            parameters: &decision.parameters,
        })?;
        return Ok(());
    }

    output.print(&"_".repeat(78))?;
    output.header(&format!("Generator: {}", decision.target))?;
    for (key, value) in decision.parameters.iter() {
        output.field(key, value)?;
    }
    Ok(())
}

// ── Generator ─────────────────────────────────────────────────────────────────

fn run_generator(
    invoker: &CommandInvoker,
    decision: &DispatchDecision,
    output: &OutputManager,
) -> CliResult<()> {
    if let Some(command) = invoker.command_for(decision.target.as_str()) {
        info!(command = %command, "invoking generator");
    }

    let spinner = (output.format() == OutputFormat::Human && !output.is_quiet())
        .then(|| start_spinner(&format!("Running {}...", decision.target)));

    let result = invoker.invoke(decision);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result?;
    Ok(())
}

fn start_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
