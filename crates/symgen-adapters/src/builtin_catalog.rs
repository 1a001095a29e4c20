//! Built-in catalog and catalog discovery.
//!
//! [`symphony_catalog`] is the question graph that ships with symgen: the
//! Symphony bot / workflow / extension-app wizard. [`discover_catalog`]
//! decides whether a catalog file replaces it.
//!
//! # Catalog resolution order
//!
//! The first source that names a file wins:
//!
//! 1. **explicit path**, usually the `--catalog` flag
//! 2. **configured path**, the `catalog.path` config value
//! 3. **`$SYMGEN_CATALOG`**, environment variable override
//! 4. **`./symgen.catalog.toml`**, only if the file exists
//!
//! When none applies the built-in catalog is used. A file named by one of the
//! first three sources must exist; a missing file is an error, not a silent
//! fallback.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use symgen_core::domain::{
    Choice, Condition, DomainError, GeneratorId, QuestionSpec, RoutingRule, WizardCatalog,
};

use crate::catalog_loader::{CatalogLoadError, FilesystemCatalogLoader};

/// Environment variable naming a catalog file.
pub const CATALOG_ENV: &str = "SYMGEN_CATALOG";

/// Catalog file picked up from the working directory.
pub const LOCAL_CATALOG_FILE: &str = "symgen.catalog.toml";

/// Default Symphony pod host.
pub const DEFAULT_HOST: &str = "develop2.symphony.com";

/// Where the active catalog came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The Symphony generator wizard.
///
/// Six questions, five routes. Language rules come before application rules,
/// so a bot answer set is routed on its language.
pub fn symphony_catalog() -> Result<WizardCatalog, DomainError> {
    let questions = vec![
        QuestionSpec::free_text("host", "Enter your pod host").with_default(DEFAULT_HOST),
        QuestionSpec::single_choice(
            "application",
            "Select your project type",
            [
                Choice::new("Bot (BDK)", "bot-app"),
                Choice::new("Workflow (WDK)", "workflow"),
                Choice::new("Extension App (ADK)", "ext-app"),
                Choice::new("Extension App + Circle of Trust (ADK + BDK)", "ext-app-bdk"),
            ],
        ),
        QuestionSpec::free_text("username", "Enter your bot username")
            .with_default("my-bot")
            .when(Condition::not_contains("application", "ext-app")),
        QuestionSpec::single_choice(
            "language",
            "Select your programing language",
            [Choice::new("Java", "java"), Choice::new("Python", "python")],
        )
        .when(Condition::equals("application", "bot-app")),
        QuestionSpec::single_choice(
            "framework",
            "Select your framework",
            [
                Choice::new("Java (no framework)", "java"),
                Choice::new("Spring Boot", "spring"),
            ],
        )
        .when(Condition::equals("application", "bot-app").and(Condition::equals("language", "java"))),
        QuestionSpec::free_text("appId", "Enter your app id")
            .with_default("app-id")
            .when(
                Condition::equals("application", "ext-app").or(Condition::equals(
                    "application",
                    "ext-app-bdk",
                )
                .and(Condition::not_equals("host", DEFAULT_HOST))),
            ),
    ];

    let rules = vec![
        route("java-generator", Condition::equals("language", "java"))?,
        route("python-generator", Condition::equals("language", "python"))?,
        route("workflow-generator", Condition::equals("application", "workflow"))?,
        route("ext-app-generator", Condition::equals("application", "ext-app"))?,
        route(
            "ext-app-bdk-generator",
            Condition::equals("application", "ext-app-bdk"),
        )?,
    ];

    WizardCatalog::new("symphony", questions, rules)
}

fn route(target: &str, when: Condition) -> Result<RoutingRule, DomainError> {
    Ok(RoutingRule::new(GeneratorId::parse(target)?, when))
}

/// Pick the catalog file to load, if any. See the module docs for the order.
pub fn catalog_path(explicit: Option<&Path>, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "catalog from explicit path");
        return Some(path.to_path_buf());
    }

    if let Some(path) = configured {
        debug!(path = %path.display(), "catalog from configuration");
        return Some(path.to_path_buf());
    }

    if let Ok(value) = std::env::var(CATALOG_ENV) {
        if !value.trim().is_empty() {
            debug!(path = %value, env = CATALOG_ENV, "catalog from environment");
            return Some(PathBuf::from(value));
        }
    }

    let local = PathBuf::from(LOCAL_CATALOG_FILE);
    if local.is_file() {
        debug!("catalog from working directory");
        return Some(local);
    }

    None
}

/// Resolve and load the active catalog.
///
/// # Errors
///
/// [`CatalogLoadError`] if a catalog file was selected but is missing,
/// unreadable, malformed, or fails validation.
#[instrument(skip_all)]
pub fn discover_catalog(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<(WizardCatalog, CatalogSource), CatalogLoadError> {
    match catalog_path(explicit, configured) {
        Some(path) => {
            let catalog = FilesystemCatalogLoader::new(&path).load()?;
            info!(path = %path.display(), catalog = catalog.name(), "loaded catalog file");
            Ok((catalog, CatalogSource::File(path)))
        }
        None => {
            let catalog = symphony_catalog().map_err(|source| CatalogLoadError::Invalid {
                path: PathBuf::from("<built-in>"),
                source,
            })?;
            debug!("using built-in catalog");
            Ok((catalog, CatalogSource::Builtin))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = symphony_catalog().unwrap();
        let keys: Vec<&str> = catalog.questions().iter().map(|q| q.key()).collect();
        assert_eq!(
            keys,
            ["host", "application", "username", "language", "framework", "appId"]
        );
        assert_eq!(catalog.rules().len(), 5);
    }

    #[test]
    fn language_rules_precede_application_rules() {
        let catalog = symphony_catalog().unwrap();
        let targets: Vec<&str> = catalog.rules().iter().map(|r| r.target.as_str()).collect();
        assert_eq!(
            targets,
            [
                "java-generator",
                "python-generator",
                "workflow-generator",
                "ext-app-generator",
                "ext-app-bdk-generator",
            ]
        );
    }

    #[test]
    fn routing_is_exhaustive_without_catch_all() {
        let catalog = symphony_catalog().unwrap();
        assert!(catalog.rules().iter().all(|r| !r.when.is_always()));
        assert_eq!(catalog.reachable_answer_sets().unwrap().len(), 12);
    }

    #[test]
    fn explicit_path_wins_over_configured() {
        let chosen = catalog_path(Some(Path::new("a.toml")), Some(Path::new("b.toml")));
        assert_eq!(chosen, Some(PathBuf::from("a.toml")));

        let chosen = catalog_path(None, Some(Path::new("b.toml")));
        assert_eq!(chosen, Some(PathBuf::from("b.toml")));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let err = discover_catalog(Some(Path::new("/definitely/not/here.toml")), None)
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::NotFound { .. }));
    }

    #[test]
    fn source_display() {
        assert_eq!(CatalogSource::Builtin.to_string(), "built-in");
        assert_eq!(
            CatalogSource::File(PathBuf::from("x.toml")).to_string(),
            "x.toml"
        );
    }
}
