//! Filesystem-based catalog loader.
//!
//! Parses a TOML catalog file into a validated [`WizardCatalog`].
//!
//! # Catalog file format
//!
//! ```toml
//! name = "my-wizard"              # optional, defaults to the file stem
//!
//! [[questions]]
//! key     = "host"
//! kind    = "free-text"           # free-text | single-choice
//! prompt  = "Enter your pod host"
//! default = "develop2.symphony.com"
//!
//! [[questions]]
//! key     = "application"
//! kind    = "single-choice"
//! prompt  = "Select your project type"
//! choices = [
//!     { label = "Bot (BDK)", value = "bot-app" },
//!     { label = "Workflow (WDK)", value = "workflow" },
//! ]
//!
//! [[questions]]
//! key     = "username"
//! kind    = "free-text"
//! prompt  = "Enter your bot username"
//! default = "my-bot"
//! when    = { not-contains = { key = "application", value = "ext-app" } }
//!
//! # Rules are tried in file order; the first match wins.
//! [[rules]]
//! target = "bot-generator"
//! when   = { equals = { key = "application", value = "bot-app" } }
//!
//! [[rules]]
//! target = "workflow-generator"
//! when   = "always"
//! ```
//!
//! Conditions compose with `all = [...]`, `any = [...]` and `not = {...}`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use symgen_core::{
    domain::{DomainError, QuestionSpec, RoutingRule, WizardCatalog},
    error::SymgenError,
};

/// Failure to turn a catalog file into a [`WizardCatalog`].
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("catalog file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid catalog '{}': {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },
}

impl From<CatalogLoadError> for SymgenError {
    fn from(err: CatalogLoadError) -> Self {
        match err {
            CatalogLoadError::Invalid { source, .. } => SymgenError::Domain(source),
            other => SymgenError::Configuration {
                message: other.to_string(),
            },
        }
    }
}

/// Deserialised representation of a catalog file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    pub name: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionSpec>,
    #[serde(default)]
    pub rules: Vec<RoutingRule>,
}

impl CatalogManifest {
    /// Parse manifest text without validating the question graph.
    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Loads one catalog file.
pub struct FilesystemCatalogLoader {
    path: PathBuf,
}

impl FilesystemCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, parse and validate the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogLoadError::NotFound`] if the file does not exist
    /// - [`CatalogLoadError::Read`] on I/O failure
    /// - [`CatalogLoadError::Parse`] for malformed TOML or unknown fields
    /// - [`CatalogLoadError::Invalid`] when the question graph or rules fail
    ///   validation
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<WizardCatalog, CatalogLoadError> {
        if !self.path.exists() {
            return Err(CatalogLoadError::NotFound {
                path: self.path.clone(),
            });
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogLoadError::Read {
            path: self.path.clone(),
            source,
        })?;

        let manifest = CatalogManifest::parse(&raw).map_err(|e| CatalogLoadError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let name = manifest.name.unwrap_or_else(|| self.default_name());
        debug!(
            name = %name,
            questions = manifest.questions.len(),
            rules = manifest.rules.len(),
            "parsed catalog manifest"
        );

        WizardCatalog::new(name, manifest.questions, manifest.rules).map_err(|source| {
            CatalogLoadError::Invalid {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn default_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().trim_end_matches(".catalog").to_string())
            .unwrap_or_else(|| "catalog".into())
    }
}
