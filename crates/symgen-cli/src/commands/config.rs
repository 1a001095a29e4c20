//! `symgen config` - read and write configuration values.
//!
//! Keys are dotted paths into the TOML document, e.g. `output.format`,
//! `defaults.host` or `generators.java-generator.program`.

use tracing::debug;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&render(&value)?)?;
            }
        }

        ConfigCommands::Set { key, value } => {
            let path = AppConfig::active_path(global.config.as_deref());
            let existing = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => {
                    return Err(e).with_cli_context(|| format!("Failed to read {}", path.display()));
                }
            };

            let updated = set_config_value(&existing, &key, &value)?;
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_cli_context(|| {
                        format!("Failed to create directory '{}'", parent.display())
                    })?;
                }
            }
            std::fs::write(&path, updated)
                .with_cli_context(|| format!("Failed to write {}", path.display()))?;

            output.success(&format!("Set {key} = {value} in {}", path.display()))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised = toml::to_string_pretty(&config)
                    .with_cli_context(|| "Failed to serialise config")?;
                output.print(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.print(
                &AppConfig::active_path(global.config.as_deref())
                    .display()
                    .to_string(),
            )?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<toml::Value> {
    let root = toml::Value::try_from(config).with_cli_context(|| "Failed to serialise config")?;

    key.split('.')
        .try_fold(&root, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| CliError::UnknownConfigKey {
            key: key.to_string(),
        })
}

fn render(value: &toml::Value) -> CliResult<String> {
    Ok(match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(table) => {
            toml::to_string_pretty(table).with_cli_context(|| "Failed to render table")?
        }
        other => other.to_string(),
    })
}

/// Return `document` with `key` set to `raw`.
///
/// `raw` is read as a TOML value when it parses as one (`true`, `3`,
/// `["a", "b"]`) and as a plain string otherwise. The result must still be a
/// valid configuration; a typed value that does not fit is retried as a
/// string.
fn set_config_value(document: &str, key: &str, raw: &str) -> CliResult<String> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(CliError::InvalidInput {
            message: format!("'{key}' is not a dotted configuration key"),
            source: None,
        });
    }

    let base: toml::Table = document.parse().map_err(|e| CliError::ConfigError {
        message: "existing configuration file is not valid TOML".into(),
        source: Some(Box::new(e)),
    })?;

    let string = toml::Value::String(raw.to_string());
    let candidates = match parse_value(raw) {
        Some(typed) if typed != string => vec![typed, string],
        _ => vec![string],
    };

    let mut last_error = None;
    for value in candidates {
        let mut table = base.clone();
        insert(&mut table, &parts, value)?;

        let rendered =
            toml::to_string_pretty(&table).with_cli_context(|| "Failed to serialise config")?;
        match toml::from_str::<AppConfig>(&rendered) {
            Ok(_) => return Ok(rendered),
            Err(e) => {
                debug!(error = %e, "candidate value rejected");
                last_error = Some(e);
            }
        }
    }

    Err(CliError::ConfigError {
        message: format!("'{raw}' is not a valid value for {key}"),
        source: last_error.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    })
}

fn parse_value(raw: &str) -> Option<toml::Value> {
    let mut table: toml::Table = format!("value = {raw}").parse().ok()?;
    table.remove("value")
}

fn insert(table: &mut toml::Table, parts: &[&str], value: toml::Value) -> CliResult<()> {
    let Some((last, parents)) = parts.split_last() else {
        return Ok(());
    };

    let mut node = table;
    for part in parents {
        let entry = node
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::Table::new()));
        node = match entry {
            toml::Value::Table(inner) => inner,
            _ => {
                return Err(CliError::InvalidInput {
                    message: format!("'{part}' is a value, not a section"),
                    source: None,
                });
            }
        };
    }
    node.insert(last.to_string(), value);
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "output.format").unwrap(),
            toml::Value::String("auto".into())
        );
        assert_eq!(
            get_config_value(&cfg, "output.no_color").unwrap(),
            toml::Value::Boolean(false)
        );
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let cfg = AppConfig::default();
        let err = get_config_value(&cfg, "does.not.exist").unwrap_err();
        assert!(matches!(err, CliError::UnknownConfigKey { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn set_creates_sections_and_keeps_types() {
        let doc = set_config_value("", "output.no_color", "true").unwrap();
        let doc = set_config_value(&doc, "defaults.host", "acme.symphony.com").unwrap();
        let cfg: AppConfig = toml::from_str(&doc).unwrap();

        assert!(cfg.output.no_color);
        assert_eq!(
            cfg.defaults.get("host").map(String::as_str),
            Some("acme.symphony.com")
        );
    }

    #[test]
    fn typed_value_falls_back_to_string() {
        let doc = set_config_value("", "defaults.port", "8443").unwrap();
        let cfg: AppConfig = toml::from_str(&doc).unwrap();
        assert_eq!(cfg.defaults.get("port").map(String::as_str), Some("8443"));
    }

    #[test]
    fn generator_args_accept_arrays() {
        // `program` is required, so it has to exist before `args` can be set.
        assert!(set_config_value("", "generators.java-generator.args", "[]").is_err());

        let doc = set_config_value("", "generators.java-generator.program", "yo").unwrap();
        let doc = set_config_value(
            &doc,
            "generators.java-generator.args",
            r#"["@finos/symphony:java"]"#,
        )
        .unwrap();
        let cfg: AppConfig = toml::from_str(&doc).unwrap();

        let java = &cfg.generators["java-generator"];
        assert_eq!(java.program, "yo");
        assert_eq!(java.args, ["@finos/symphony:java"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            set_config_value("", "output.no_color", "maybe"),
            Err(CliError::ConfigError { .. })
        ));
        assert!(matches!(
            set_config_value("[output]\nformat = \"json\"\n", "output.format.deep", "x"),
            Err(CliError::InvalidInput { .. })
        ));
    }
}
