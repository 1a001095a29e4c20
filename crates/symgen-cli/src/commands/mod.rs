//! Command handlers, one module per subcommand.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod questions;

use tracing::debug;

use symgen_adapters::{CatalogSource, discover_catalog};
use symgen_core::domain::WizardCatalog;

use crate::{cli::CatalogArgs, config::AppConfig, error::CliResult};

/// Resolve the active catalog and apply configured default overrides.
pub(crate) fn load_catalog(
    args: &CatalogArgs,
    config: &AppConfig,
) -> CliResult<(WizardCatalog, CatalogSource)> {
    let (catalog, source) =
        discover_catalog(args.catalog.as_deref(), config.catalog.path.as_deref())?;

    let overrides = config.defaults_for(&catalog);
    if !overrides.is_empty() {
        debug!(count = overrides.len(), "applying configured defaults");
    }
    let catalog = catalog
        .with_default_overrides(&overrides)
        .map_err(symgen_core::error::SymgenError::from)?;

    Ok((catalog, source))
}
