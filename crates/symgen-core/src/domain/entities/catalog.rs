//! The validated question graph plus its routing rules.
//!
//! A [`WizardCatalog`] can only be obtained through [`WizardCatalog::new`],
//! which runs every static check in [`DomainValidator`]. Holding a catalog is
//! therefore proof that:
//!
//! - question keys are unique and well-formed
//! - every visibility condition reads only earlier answers
//! - every routing condition reads only known answers
//! - every reachable answer set is routed somewhere
//! - there are at most [`MAX_REACHABLE_SETS`] reachable answer sets

use std::{
    collections::{BTreeSet, HashMap},
    ops::ControlFlow,
};

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    Condition, DomainError, DomainValidator as validator,
    entities::{answer_set::AnswerSet, question::QuestionSpec, routing::RoutingRule},
    value_objects::QuestionKind,
};

/// Placeholder standing in for "any other free-text input" when enumerating.
const CUSTOM_ANSWER: &str = "<custom>";

/// Most answer sets a catalog may produce before it is rejected.
pub const MAX_REACHABLE_SETS: usize = 65_536;

/// Validated questions and routing rules for one wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardCatalog {
    name: String,
    questions: Vec<QuestionSpec>,
    rules: Vec<RoutingRule>,
}

impl WizardCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// Any configuration error found by [`DomainValidator`], including
    /// [`DomainError::NonExhaustiveRules`] with the first unrouted answer set.
    pub fn new(
        name: impl Into<String>,
        questions: Vec<QuestionSpec>,
        rules: Vec<RoutingRule>,
    ) -> Result<Self, DomainError> {
        validator::validate_questions(&questions)?;
        validator::validate_rules(&rules, &questions)?;

        let catalog = Self {
            name: name.into(),
            questions,
            rules,
        };
        validator::validate_exhaustive(&catalog)?;

        debug!(
            catalog = %catalog.name,
            questions = catalog.questions.len(),
            rules = catalog.rules.len(),
            "catalog validated"
        );
        Ok(catalog)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[QuestionSpec] {
        &self.questions
    }

    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    pub fn question(&self, key: &str) -> Option<&QuestionSpec> {
        self.questions.iter().find(|q| q.key() == key)
    }

    /// Keys of the questions declared before `key`.
    ///
    /// Returns `None` if `key` is not a question of this catalog.
    pub fn keys_before(&self, key: &str) -> Option<Vec<&str>> {
        let index = self.questions.iter().position(|q| q.key() == key)?;
        Some(self.questions[..index].iter().map(QuestionSpec::key).collect())
    }

    /// Rebuild the catalog with some question defaults replaced.
    ///
    /// # Errors
    ///
    /// [`DomainError::UnknownDefaultOverride`] for a key no question declares,
    /// [`DomainError::DefaultNotAChoice`] for a single-choice override that is
    /// not a choice, or any error from re-validating the catalog.
    pub fn with_default_overrides(
        self,
        overrides: &HashMap<String, String>,
    ) -> Result<Self, DomainError> {
        if overrides.is_empty() {
            return Ok(self);
        }

        if let Some(unknown) = overrides.keys().find(|k| self.question(k).is_none()) {
            return Err(DomainError::UnknownDefaultOverride {
                key: unknown.clone(),
            });
        }

        let questions = self
            .questions
            .into_iter()
            .map(|q| match overrides.get(q.key()) {
                Some(default) => q.override_default(default.clone()),
                None => Ok(q),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(self.name, questions, self.rules)
    }

    /// Every answer set the wizard can produce, up to equivalence.
    ///
    /// Single-choice questions branch on each choice value. Free-text
    /// questions branch on every literal some condition compares them
    /// against, on their default, on one value per combination of the
    /// literals tested with `contains`/`not-contains`, and on one placeholder
    /// matching none of those; a free-text key that no condition reads
    /// contributes a single representative value.
    ///
    /// # Errors
    ///
    /// [`DomainError::TooManyCombinations`] once more than
    /// [`MAX_REACHABLE_SETS`] sets would be produced.
    pub fn reachable_answer_sets(&self) -> Result<Vec<AnswerSet>, DomainError> {
        let mut out = Vec::new();
        self.walk_reachable(|answers| -> ControlFlow<()> {
            out.push(answers);
            ControlFlow::Continue(())
        })?;
        Ok(out)
    }

    /// Visit reachable answer sets one at a time.
    ///
    /// Stops at the first set `visit` breaks on and returns its value.
    pub(crate) fn walk_reachable<B>(
        &self,
        mut visit: impl FnMut(AnswerSet) -> ControlFlow<B>,
    ) -> Result<Option<B>, DomainError> {
        let candidates = self
            .questions
            .iter()
            .map(|q| self.candidate_values(q))
            .collect::<Result<Vec<_>, _>>()?;

        let mut visited = 0;
        match self.walk(0, AnswerSet::new(), &candidates, &mut visited, &mut visit)? {
            ControlFlow::Break(found) => Ok(Some(found)),
            ControlFlow::Continue(()) => Ok(None),
        }
    }

    fn walk<B, F>(
        &self,
        index: usize,
        current: AnswerSet,
        candidates: &[Vec<String>],
        visited: &mut usize,
        visit: &mut F,
    ) -> Result<ControlFlow<B>, DomainError>
    where
        F: FnMut(AnswerSet) -> ControlFlow<B>,
    {
        let Some(question) = self.questions.get(index) else {
            *visited += 1;
            if *visited > MAX_REACHABLE_SETS {
                return Err(DomainError::TooManyCombinations {
                    limit: MAX_REACHABLE_SETS,
                });
            }
            return Ok(visit(current));
        };

        if !question.is_visible(&current) {
            return self.walk(index + 1, current, candidates, visited, visit);
        }

        for value in &candidates[index] {
            let mut next = current.clone();
            // Keys are unique in a validated catalog.
            if next.record(question.key(), value.as_str()).is_ok() {
                if let ControlFlow::Break(found) =
                    self.walk(index + 1, next, candidates, visited, visit)?
                {
                    return Ok(ControlFlow::Break(found));
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn candidate_values(&self, question: &QuestionSpec) -> Result<Vec<String>, DomainError> {
        if question.kind() == QuestionKind::SingleChoice {
            return Ok(question.choices().iter().map(|c| c.value.clone()).collect());
        }

        let mut literals = BTreeSet::new();
        let mut contained = BTreeSet::new();
        for condition in self.conditions() {
            condition.literals_for(question.key(), &mut literals);
            condition.contained_literals_for(question.key(), &mut contained);
        }

        if literals.is_empty() {
            return Ok(vec![
                question
                    .default_value()
                    .unwrap_or(CUSTOM_ANSWER)
                    .to_string(),
            ]);
        }

        // Every string contains the empty string.
        contained.retain(|l| !l.is_empty());
        let contained: Vec<&str> = contained.into_iter().collect();
        let subsets = u32::try_from(contained.len())
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .filter(|&n| n <= MAX_REACHABLE_SETS)
            .ok_or(DomainError::TooManyCombinations {
                limit: MAX_REACHABLE_SETS,
            })?;

        // Literals themselves, for the `equals` family. Blank input never
        // survives as a free-text answer.
        let mut values: Vec<String> = literals
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.to_string())
            .collect();
        if let Some(default) = question.default_value() {
            if !literals.contains(default) {
                values.push(default.to_string());
            }
        }

        // One value per set of contained literals, equal to no literal.
        values.push(placeholder_avoiding(&literals));
        let separator = separator_avoiding(&literals).to_string();
        for mask in 1..subsets {
            let picked: Vec<&str> = contained
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, l)| *l)
                .collect();
            values.push(format!(
                "{separator}{}{separator}",
                picked.join(&separator)
            ));
        }
        Ok(values)
    }

    fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.questions
            .iter()
            .filter_map(QuestionSpec::condition)
            .chain(self.rules.iter().map(|r| &r.when))
    }
}

/// A free-text value that neither equals nor contains any of `literals`.
fn placeholder_avoiding(literals: &BTreeSet<&str>) -> String {
    let clashes = |candidate: &str| {
        literals
            .iter()
            .any(|l| !l.is_empty() && candidate.contains(l))
    };

    if !clashes(CUSTOM_ANSWER) {
        return CUSTOM_ANSWER.to_string();
    }

    // A run of one character that no literal uses cannot contain any literal.
    separator_avoiding(literals).to_string().repeat(3)
}

/// A character that appears in none of `literals`.
///
/// Joining literals with it yields a string that contains exactly those
/// literals and their substrings, and equals none of `literals`.
fn separator_avoiding(literals: &BTreeSet<&str>) -> char {
    let unused = |c: &char| !literals.iter().any(|l| l.contains(*c));
    ['|', '~', '^', '#', '%']
        .into_iter()
        .find(unused)
        .or_else(|| (0x2400..=0x10_FFFF).filter_map(char::from_u32).find(unused))
        .unwrap_or('\u{0}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Choice, Condition, GeneratorId};

    fn id(s: &str) -> GeneratorId {
        GeneratorId::parse(s).unwrap()
    }

    fn kind_question() -> QuestionSpec {
        QuestionSpec::single_choice(
            "kind",
            "Kind",
            [Choice::new("Bot", "bot"), Choice::new("App", "app")],
        )
    }

    #[test]
    fn rejects_forward_reference() {
        let questions = vec![
            QuestionSpec::free_text("name", "Name").when(Condition::equals("kind", "bot")),
            kind_question(),
        ];
        let err = WizardCatalog::new("t", questions, vec![RoutingRule::catch_all(id("x"))])
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ForwardReference {
                question: "name".into(),
                referenced: "kind".into()
            }
        );
    }

    #[test]
    fn rejects_self_reference() {
        let questions = vec![QuestionSpec::free_text("name", "Name").when(Condition::absent("name"))];
        assert!(matches!(
            WizardCatalog::new("t", questions, vec![RoutingRule::catch_all(id("x"))]),
            Err(DomainError::ForwardReference { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let questions = vec![kind_question(), kind_question()];
        assert!(matches!(
            WizardCatalog::new("t", questions, vec![RoutingRule::catch_all(id("x"))]),
            Err(DomainError::DuplicateQuestionKey { .. })
        ));
    }

    #[test]
    fn rejects_unknown_rule_key() {
        let rules = vec![RoutingRule::new(id("x"), Condition::equals("language", "java"))];
        assert!(matches!(
            WizardCatalog::new("t", vec![kind_question()], rules),
            Err(DomainError::UnknownRuleKey { .. })
        ));
    }

    #[test]
    fn rejects_missing_rules() {
        assert_eq!(
            WizardCatalog::new("t", vec![kind_question()], vec![]).unwrap_err(),
            DomainError::MissingRules
        );
    }

    #[test]
    fn rejects_non_exhaustive_rules_with_example() {
        let rules = vec![RoutingRule::new(id("bot-generator"), Condition::equals("kind", "bot"))];
        match WizardCatalog::new("t", vec![kind_question()], rules) {
            Err(DomainError::NonExhaustiveRules { unmatched }) => {
                assert_eq!(unmatched.get("kind"), Some("app"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn catch_all_makes_rules_exhaustive() {
        let rules = vec![
            RoutingRule::new(id("bot-generator"), Condition::equals("kind", "bot")),
            RoutingRule::catch_all(id("fallback")),
        ];
        assert!(WizardCatalog::new("t", vec![kind_question()], rules).is_ok());
    }

    #[test]
    fn free_text_branches_on_literals_and_placeholder() {
        let questions = vec![
            QuestionSpec::free_text("host", "Host").with_default("dev.example.com"),
            QuestionSpec::free_text("appId", "App id")
                .with_default("app-id")
                .when(Condition::not_equals("host", "dev.example.com")),
        ];
        let catalog =
            WizardCatalog::new("t", questions, vec![RoutingRule::catch_all(id("x"))]).unwrap();

        let sets = catalog.reachable_answer_sets().unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().any(|s| !s.contains("appId")));
        assert!(
            sets.iter()
                .any(|s| s.get("appId") == Some("app-id") && s.get("host") == Some(CUSTOM_ANSWER))
        );
    }

    #[test]
    fn contains_rules_are_checked_for_every_literal_combination() {
        let questions = vec![QuestionSpec::free_text("name", "Name")];
        let rules = vec![
            RoutingRule::new(id("no-a"), Condition::not_contains("name", "a")),
            RoutingRule::new(id("no-b"), Condition::not_contains("name", "b")),
        ];

        match WizardCatalog::new("t", questions.clone(), rules.clone()) {
            Err(DomainError::NonExhaustiveRules { unmatched }) => {
                let name = unmatched.get("name").unwrap();
                assert!(name.contains('a') && name.contains('b'), "{name}");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let mut covered = rules;
        covered.push(RoutingRule::new(
            id("both"),
            Condition::contains("name", "a").and(Condition::contains("name", "b")),
        ));
        let catalog = WizardCatalog::new("t", questions, covered).unwrap();
        assert_eq!(catalog.reachable_answer_sets().unwrap().len(), 6);
    }

    #[test]
    fn combined_value_contains_only_its_literals() {
        let questions = vec![QuestionSpec::free_text("name", "Name")];
        let rules = vec![
            RoutingRule::new(id("ab"), Condition::contains("name", "ab")),
            RoutingRule::new(id("no-a"), Condition::not_contains("name", "a")),
            RoutingRule::new(id("no-b"), Condition::not_contains("name", "b")),
        ];

        // "a" and "b" apart without "ab" is reachable and unrouted.
        match WizardCatalog::new("t", questions, rules) {
            Err(DomainError::NonExhaustiveRules { unmatched }) => {
                let name = unmatched.get("name").unwrap();
                assert!(name.contains('a') && name.contains('b') && !name.contains("ab"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    fn binary_questions(count: usize) -> Vec<QuestionSpec> {
        (0..count)
            .map(|i| {
                QuestionSpec::single_choice(
                    format!("q{i}"),
                    "Pick",
                    [Choice::new("A", "a"), Choice::new("B", "b")],
                )
            })
            .collect()
    }

    #[test]
    fn first_unmatched_set_stops_validation() {
        let rules = vec![RoutingRule::new(id("x"), Condition::equals("q19", "a"))];
        match WizardCatalog::new("t", binary_questions(20), rules) {
            Err(DomainError::NonExhaustiveRules { unmatched }) => {
                assert_eq!(unmatched.get("q19"), Some("b"));
                assert_eq!(unmatched.get("q0"), Some("a"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn oversized_catalogs_are_rejected() {
        let rules = vec![
            RoutingRule::new(id("x"), Condition::equals("q0", "a")),
            RoutingRule::new(id("y"), Condition::equals("q0", "b")),
        ];
        assert_eq!(
            WizardCatalog::new("t", binary_questions(20), rules).unwrap_err(),
            DomainError::TooManyCombinations {
                limit: MAX_REACHABLE_SETS
            }
        );

        let catalog = WizardCatalog::new(
            "t",
            binary_questions(20),
            vec![RoutingRule::catch_all(id("x"))],
        )
        .unwrap();
        assert!(matches!(
            catalog.reachable_answer_sets(),
            Err(DomainError::TooManyCombinations { .. })
        ));
    }

    #[test]
    fn placeholder_avoids_contained_literals() {
        let literals: BTreeSet<&str> = ["custom"].into_iter().collect();
        let value = placeholder_avoiding(&literals);
        assert!(!value.contains("custom"));
    }

    #[test]
    fn default_overrides_are_validated() {
        let catalog = WizardCatalog::new(
            "t",
            vec![kind_question()],
            vec![RoutingRule::catch_all(id("x"))],
        )
        .unwrap();

        let ok: HashMap<String, String> = [("kind".to_string(), "app".to_string())].into();
        let updated = catalog.clone().with_default_overrides(&ok).unwrap();
        assert_eq!(updated.question("kind").unwrap().default_value(), Some("app"));

        let not_a_choice: HashMap<String, String> =
            [("kind".to_string(), "lib".to_string())].into();
        assert!(matches!(
            catalog.clone().with_default_overrides(&not_a_choice),
            Err(DomainError::DefaultNotAChoice { .. })
        ));

        let unknown: HashMap<String, String> = [("nope".to_string(), "x".to_string())].into();
        assert!(matches!(
            catalog.with_default_overrides(&unknown),
            Err(DomainError::UnknownDefaultOverride { .. })
        ));
    }

    #[test]
    fn keys_before_lists_prefix() {
        let questions = vec![
            kind_question(),
            QuestionSpec::free_text("name", "Name"),
        ];
        let catalog =
            WizardCatalog::new("t", questions, vec![RoutingRule::catch_all(id("x"))]).unwrap();
        assert_eq!(catalog.keys_before("name"), Some(vec!["kind"]));
        assert_eq!(catalog.keys_before("kind"), Some(vec![]));
        assert_eq!(catalog.keys_before("missing"), None);
    }
}
