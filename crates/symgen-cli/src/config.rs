//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `SYMGEN__SECTION__KEY` (e.g. `SYMGEN__OUTPUT__FORMAT=json`)
//! 3. Config file, `--config FILE` or the platform config dir
//! 4. Built-in defaults (always present)
//!
//! ```toml
//! [output]
//! no_color = false
//! format = "auto"
//!
//! [catalog]
//! path = "/etc/symgen/catalog.toml"
//!
//! [defaults]
//! host = "acme.symphony.com"
//!
//! [generators.java-generator]
//! program = "yo"
//! args = ["@finos/symphony:java"]
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use symgen_adapters::GeneratorCommand;
use symgen_core::domain::WizardCatalog;

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "SYMGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Catalog settings.
    pub catalog: CatalogConfig,
    /// Question defaults replacing the catalog's own, keyed by question key.
    pub defaults: HashMap<String, String>,
    /// Generator command per target id.
    pub generators: HashMap<String, GeneratorCommand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "loading configuration");

        let builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::File::from(path.clone())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .with_context(|| format!("reading configuration from {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.symgen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "symgen", "symgen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".symgen.toml"))
    }

    /// The file `config set` and `init` write to.
    pub fn active_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Configured defaults keyed by the catalog's own spelling.
    ///
    /// Keys match question keys case-insensitively, so `appid` from an
    /// environment variable still lands on `appId`. Unmatched keys are kept
    /// as written and rejected later by the catalog.
    pub fn defaults_for(&self, catalog: &WizardCatalog) -> HashMap<String, String> {
        self.defaults
            .iter()
            .map(|(key, value)| {
                let key = catalog
                    .questions()
                    .iter()
                    .map(|q| q.key())
                    .find(|k| k.eq_ignore_ascii_case(key))
                    .unwrap_or(key);
                (key.to_string(), value.clone())
            })
            .collect()
    }

    /// Generator commands, with target ids lowercased.
    pub fn generator_commands(&self) -> HashMap<String, GeneratorCommand> {
        self.generators
            .iter()
            .map(|(target, command)| (target.to_ascii_lowercase(), command.clone()))
            .collect()
    }
}
