//! Wizard Service - one end-to-end wizard run.
//!
//! Orchestrates the ports around the two pure components:
//!
//! 1. Probe the destination folder and warn when it is not empty
//! 2. Resolve the catalog's questions through the input source
//! 3. Route the answer set through the catalog's rules
//! 4. Hand the decision to a generator invoker (`run` only)

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Diagnostics, GeneratorInvoker, InputSource, WorkspaceProbe},
        services::{DispatchRouter, QuestionResolver},
    },
    domain::{DispatchDecision, WizardCatalog},
    error::SymgenResult,
};

pub struct WizardService {
    catalog: WizardCatalog,
    resolver: QuestionResolver,
    router: DispatchRouter,
    workspace: Box<dyn WorkspaceProbe>,
    diagnostics: Box<dyn Diagnostics>,
}

impl WizardService {
    pub fn new(
        catalog: WizardCatalog,
        input: Box<dyn InputSource>,
        workspace: Box<dyn WorkspaceProbe>,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        Self {
            catalog,
            resolver: QuestionResolver::new(input),
            router: DispatchRouter::new(),
            workspace,
            diagnostics,
        }
    }

    pub fn catalog(&self) -> &WizardCatalog {
        &self.catalog
    }

    /// Collect answers and decide on a generator without invoking it.
    #[instrument(skip_all, fields(catalog = self.catalog.name(), root = %root.display()))]
    pub fn plan(&self, root: &Path) -> SymgenResult<DispatchDecision> {
        self.check_workspace(root);

        let answers = self.resolver.resolve(self.catalog.questions())?;
        let decision = self.router.route(answers, self.catalog.rules())?;

        info!(target_id = %decision.target, "wizard decided");
        Ok(decision)
    }

    /// Plan, then invoke the selected generator.
    ///
    /// The returned decision is the one the invoker received.
    pub fn run(
        &self,
        root: &Path,
        invoker: &dyn GeneratorInvoker,
    ) -> SymgenResult<DispatchDecision> {
        let decision = self.plan(root)?;
        invoker.invoke(&decision)?;
        Ok(decision)
    }

    fn check_workspace(&self, root: &Path) {
        self.diagnostics.notice(&format!(
            "Project files will be generated in folder: {}",
            root.display()
        ));

        match self.workspace.is_empty(root) {
            Ok(true) => {}
            Ok(false) => self.diagnostics.warning(&format!(
                "(!) Folder {} is not empty. Are you sure you want to continue?",
                root.display()
            )),
            Err(e) => {
                warn!(error = %e, "workspace probe failed");
                self.diagnostics
                    .warning(&format!("Could not inspect {}: {e}", root.display()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        application::{ApplicationError, ports::MockInputSource},
        domain::{Condition, GeneratorId, QuestionSpec, RoutingRule},
        error::SymgenError,
    };

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl Lines {
        fn all(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Diagnostics for Lines {
        fn notice(&self, message: &str) {
            self.0.lock().unwrap().push(format!("notice: {message}"));
        }

        fn warning(&self, message: &str) {
            self.0.lock().unwrap().push(format!("warning: {message}"));
        }
    }

    struct FixedProbe(SymgenResult<bool>);

    impl WorkspaceProbe for FixedProbe {
        fn is_empty(&self, _root: &Path) -> SymgenResult<bool> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Captured(Mutex<Vec<DispatchDecision>>);

    impl GeneratorInvoker for Captured {
        fn invoke(&self, decision: &DispatchDecision) -> SymgenResult<()> {
            self.0.lock().unwrap().push(decision.clone());
            Ok(())
        }
    }

    fn catalog() -> WizardCatalog {
        WizardCatalog::new(
            "tiny",
            vec![QuestionSpec::free_text("name", "Name?").with_default("demo")],
            vec![RoutingRule::new(
                GeneratorId::parse("demo-generator").unwrap(),
                Condition::present("name"),
            )],
        )
        .unwrap()
    }

    fn answering(value: &'static str) -> Box<MockInputSource> {
        let mut input = MockInputSource::new();
        input.expect_ask().returning(move |_, _| Ok(value.to_string()));
        Box::new(input)
    }

    #[test]
    fn run_invokes_exactly_once_with_decision() {
        let lines = Lines::default();
        let service = WizardService::new(
            catalog(),
            answering(""),
            Box::new(FixedProbe(Ok(true))),
            Box::new(lines.clone()),
        );
        let invoker = Captured::default();

        let decision = service.run(Path::new("out"), &invoker).unwrap();

        let invoked = invoker.0.lock().unwrap();
        assert_eq!(invoked.len(), 1);
        assert_eq!(invoked[0], decision);
        assert_eq!(decision.parameters.get("name"), Some("demo"));
        assert!(lines.all().iter().all(|l| !l.starts_with("warning")));
    }

    #[test]
    fn non_empty_folder_warns_but_continues() {
        let lines = Lines::default();
        let service = WizardService::new(
            catalog(),
            answering("x"),
            Box::new(FixedProbe(Ok(false))),
            Box::new(lines.clone()),
        );

        let decision = service.plan(Path::new("busy")).unwrap();

        assert_eq!(decision.target.as_str(), "demo-generator");
        assert!(
            lines
                .all()
                .contains(&"warning: (!) Folder busy is not empty. Are you sure you want to continue?".to_string())
        );
    }

    #[test]
    fn probe_failure_is_only_a_warning() {
        let lines = Lines::default();
        let service = WizardService::new(
            catalog(),
            answering("x"),
            Box::new(FixedProbe(Err(ApplicationError::WorkspaceError {
                path: "locked".into(),
                reason: "permission denied".into(),
            }
            .into()))),
            Box::new(lines.clone()),
        );

        assert!(service.plan(Path::new("locked")).is_ok());
        assert!(lines.all().iter().any(|l| l.starts_with("warning: Could not inspect")));
    }

    #[test]
    fn input_failure_never_reaches_invoker() {
        let mut input = MockInputSource::new();
        input.expect_ask().returning(|q, _| {
            Err(ApplicationError::Cancelled {
                key: q.key().to_string(),
            }
            .into())
        });
        let service = WizardService::new(
            catalog(),
            Box::new(input),
            Box::new(FixedProbe(Ok(true))),
            Box::new(Lines::default()),
        );
        let invoker = Captured::default();

        let err = service.run(Path::new("out"), &invoker).unwrap_err();

        assert!(matches!(
            err,
            SymgenError::Application(ApplicationError::Cancelled { .. })
        ));
        assert!(invoker.0.lock().unwrap().is_empty());
    }
}
