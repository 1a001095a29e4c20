//! `symgen init` - create a default configuration file.

use std::path::Path;

use symgen_adapters::{builtin_catalog::LOCAL_CATALOG_FILE, symphony_catalog};
use symgen_core::error::SymgenError;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the default configuration, and optionally the built-in catalog.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = AppConfig::active_path(global.config.as_deref());
    let config = toml::to_string_pretty(&AppConfig::default())
        .with_cli_context(|| "Failed to serialise default config")?;
    write_file(&config_path, &config, args.force)?;
    output.success(&format!(
        "Configuration created at {}",
        config_path.display()
    ))?;

    if args.catalog {
        let catalog = symphony_catalog().map_err(SymgenError::from)?;
        let rendered = toml::to_string_pretty(&catalog)
            .with_cli_context(|| "Failed to serialise built-in catalog")?;
        let catalog_path = Path::new(LOCAL_CATALOG_FILE);
        write_file(catalog_path, &rendered, args.force)?;
        output.success(&format!(
            "Catalog written to {} (picked up automatically from this folder)",
            catalog_path.display()
        ))?;
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_cli_context(|| {
                format!("Failed to create directory '{}'", parent.display())
            })?;
        }
    }

    std::fs::write(path, contents)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))
}
