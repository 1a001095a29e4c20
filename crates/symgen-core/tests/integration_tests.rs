//! Integration tests for symgen-core.
//!
//! Drive the public API end to end with in-test port implementations.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use symgen_core::prelude::*;

struct MapInput {
    answers: HashMap<&'static str, &'static str>,
    asked: Mutex<Vec<String>>,
}

impl MapInput {
    fn new(answers: &[(&'static str, &'static str)]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl InputSource for &'static MapInput {
    fn ask(&self, question: &QuestionSpec, _answers: &AnswerSet) -> SymgenResult<String> {
        self.asked.lock().unwrap().push(question.key().to_string());
        Ok(self
            .answers
            .get(question.key())
            .copied()
            .unwrap_or_default()
            .to_string())
    }
}

struct Quiet;

impl Diagnostics for Quiet {
    fn notice(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
}

impl WorkspaceProbe for Quiet {
    fn is_empty(&self, _root: &Path) -> SymgenResult<bool> {
        Ok(true)
    }
}

fn id(s: &str) -> GeneratorId {
    GeneratorId::parse(s).unwrap()
}

fn service_catalog() -> WizardCatalog {
    WizardCatalog::new(
        "pets",
        vec![
            QuestionSpec::single_choice(
                "pet",
                "Which pet?",
                [Choice::new("Cat", "cat"), Choice::new("Dog", "dog")],
            ),
            QuestionSpec::free_text("name", "Name?").with_default("rex"),
            QuestionSpec::single_choice(
                "breed",
                "Breed?",
                [Choice::new("Husky", "husky"), Choice::new("Pug", "pug")],
            )
            .when(Condition::equals("pet", "dog")),
        ],
        vec![
            RoutingRule::new(id("cat-generator"), Condition::equals("pet", "cat")),
            RoutingRule::new(id("dog-generator"), Condition::present("breed")),
        ],
    )
    .unwrap()
}

fn leak(input: MapInput) -> &'static MapInput {
    Box::leak(Box::new(input))
}

#[test]
fn full_wizard_run_skips_hidden_questions() {
    let input = leak(MapInput::new(&[("pet", "cat")]));
    let service = WizardService::new(
        service_catalog(),
        Box::new(input),
        Box::new(Quiet),
        Box::new(Quiet),
    );

    let decision = service.plan(Path::new(".")).unwrap();

    assert_eq!(decision.target.as_str(), "cat-generator");
    assert_eq!(decision.parameters.get("name"), Some("rex"));
    assert!(!decision.parameters.contains("breed"));
    assert_eq!(*input.asked.lock().unwrap(), vec!["pet", "name"]);
}

#[test]
fn every_reachable_set_routes_and_is_prefix_consistent() {
    let catalog = service_catalog();
    let sets = catalog.reachable_answer_sets().unwrap();
    assert_eq!(sets.len(), 3);

    for answers in sets {
        for key in answers.keys() {
            let before = catalog.keys_before(key).unwrap();
            let question = catalog.question(key).unwrap();
            if let Some(condition) = question.condition() {
                assert!(condition.referenced_keys().iter().all(|k| before.contains(k)));
            }
        }
        assert!(DispatchRouter::new().route(answers, catalog.rules()).is_ok());
    }
}

#[test]
fn decision_serializes_as_target_and_parameters() {
    let answers: AnswerSet = [("pet", "dog"), ("breed", "pug")].into_iter().collect();
    let decision = DispatchRouter::new()
        .route(answers, service_catalog().rules())
        .unwrap();

    let json = serde_json::to_value(&decision).unwrap();
    assert_eq!(json["target"], "dog-generator");
    assert_eq!(json["parameters"]["breed"], "pug");
}

#[test]
fn catalog_deserializes_from_json_rules() {
    let rule: RoutingRule = serde_json::from_str(
        r#"{ "target": "dog-generator", "when": { "equals": { "key": "pet", "value": "dog" } } }"#,
    )
    .unwrap();
    assert_eq!(rule.target, id("dog-generator"));
    assert_eq!(rule.when, Condition::equals("pet", "dog"));
}
