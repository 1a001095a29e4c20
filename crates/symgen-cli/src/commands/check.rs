//! `symgen check` - validate a catalog and show every route.
//!
//! Loading the catalog already proves it valid; this command additionally
//! prints each reachable answer combination and the generator it reaches.

use serde::Serialize;
use tracing::instrument;

use symgen_core::{
    application::DispatchRouter,
    domain::{AnswerSet, GeneratorId, WizardCatalog},
    error::SymgenError,
};

use crate::{cli::CheckArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// One reachable combination and its route.
#[derive(Debug, Serialize)]
struct Route {
    answers: AnswerSet,
    target: GeneratorId,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    catalog: String,
    source: String,
    questions: usize,
    rules: usize,
    routes: Vec<Route>,
}

#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let (catalog, source) = super::load_catalog(&args.catalog, &config)?;
    let report = CheckReport {
        catalog: catalog.name().to_string(),
        source: source.to_string(),
        questions: catalog.questions().len(),
        rules: catalog.rules().len(),
        routes: routes(&catalog)?,
    };

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&format!(
        "Catalog '{}' ({}) is valid: {} questions, {} rules",
        report.catalog, report.source, report.questions, report.rules
    ))?;
    output.print("")?;
    output.header(&format!("{} reachable answer sets:", report.routes.len()))?;
    for route in &report.routes {
        output.print(&format!("  {} -> {}", route.answers, route.target))?;
    }

    Ok(())
}

fn routes(catalog: &WizardCatalog) -> CliResult<Vec<Route>> {
    let router = DispatchRouter::new();
    catalog
        .reachable_answer_sets()
        .map_err(SymgenError::from)?
        .into_iter()
        .map(|answers| -> CliResult<Route> {
            let decision = router.route(answers, catalog.rules())?;
            Ok(Route {
                answers: decision.parameters,
                target: decision.target,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgen_adapters::symphony_catalog;

    #[test]
    fn every_builtin_route_is_listed() {
        let routes = routes(&symphony_catalog().unwrap()).unwrap();
        assert_eq!(routes.len(), 12);

        let mut targets: Vec<&str> = routes.iter().map(|r| r.target.as_str()).collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(
            targets,
            [
                "ext-app-bdk-generator",
                "ext-app-generator",
                "java-generator",
                "python-generator",
                "workflow-generator",
            ]
        );
    }
}
