//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "symgen",
    bin_name = "symgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Interactive project generator wizard for Symphony apps",
    long_about = "symgen asks a short series of conditional questions, then \
                  hands the answers to exactly one generator chosen by the \
                  catalog's routing rules.",
    after_help = "EXAMPLES:\n\
        \x20 symgen new my-bot\n\
        \x20 symgen new my-bot -a application=bot-app -a language=python --non-interactive\n\
        \x20 symgen check --catalog ./symgen.catalog.toml\n\
        \x20 symgen completions bash > /usr/share/bash-completion/completions/symgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the wizard and dispatch to one generator.
    #[command(
        visible_alias = "n",
        about = "Run the wizard in a destination folder",
        after_help = "EXAMPLES:\n\
            \x20 symgen new                       # current folder\n\
            \x20 symgen new my-bot --dry-run      # decide, do not generate\n\
            \x20 symgen new my-app -a application=ext-app -a appId=acme --non-interactive"
    )]
    New(NewArgs),

    /// Show the questions of the active catalog.
    #[command(
        visible_alias = "q",
        about = "List catalog questions",
        after_help = "EXAMPLES:\n\
            \x20 symgen questions\n\
            \x20 symgen questions --format json"
    )]
    Questions(QuestionsArgs),

    /// Validate a catalog and show where every answer path is routed.
    #[command(
        about = "Validate a catalog",
        after_help = "EXAMPLES:\n\
            \x20 symgen check\n\
            \x20 symgen check --catalog ./symgen.catalog.toml"
    )]
    Check(CheckArgs),

    /// Initialise a symgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 symgen init            # default location\n\
            \x20 symgen init --force    # overwrite an existing file\n\
            \x20 symgen init --catalog  # also write ./symgen.catalog.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 symgen completions bash > ~/.local/share/bash-completion/completions/symgen\n\
            \x20 symgen completions zsh  > ~/.zfunc/_symgen\n\
            \x20 symgen completions fish > ~/.config/fish/completions/symgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the symgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 symgen config get defaults.host\n\
            \x20 symgen config set defaults.host acme.symphony.com\n\
            \x20 symgen config list"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `symgen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Destination folder. Defaults to the current directory.
    #[arg(value_name = "DIR", help = "Destination folder [default: .]")]
    pub dir: Option<PathBuf>,

    /// Pre-supplied answers. A question with a pre-supplied answer is not
    /// prompted for; the value is still validated.
    #[arg(
        short = 'a',
        long = "answer",
        value_name = "KEY=VALUE",
        value_parser = parse_answer,
        help = "Answer a question up front (repeatable)"
    )]
    pub answers: Vec<(String, String)>,

    /// Never prompt. Unanswered questions take their default or fail.
    #[arg(
        long = "non-interactive",
        help = "Never prompt; use --answer values and defaults"
    )]
    pub non_interactive: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the routing decision without invoking a generator.
    #[arg(long = "dry-run", help = "Decide the generator but do not run it")]
    pub dry_run: bool,
}

impl NewArgs {
    /// The destination folder, defaulting to `.`.
    pub fn destination(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Parse `KEY=VALUE`. The value may itself contain `=`.
fn parse_answer(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Catalog selection shared by `new`, `questions` and `check`.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Catalog file to use instead of the configured or built-in one.
    #[arg(long = "catalog", value_name = "FILE", help = "Catalog file (TOML)")]
    pub catalog: Option<PathBuf>,
}

// ── questions ─────────────────────────────────────────────────────────────────

/// Arguments for `symgen questions`.
#[derive(Debug, Args)]
pub struct QuestionsArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output layout.
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Layouts for `symgen questions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned table.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `symgen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `symgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite existing files.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Also write the built-in catalog to `./symgen.catalog.toml`.
    #[arg(long = "catalog", help = "Write the built-in catalog for editing")]
    pub catalog: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `symgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

/// `symgen config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value by dotted key, e.g. `output.format`.
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Write one value to the configuration file.
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the configuration file path.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("symgen").chain(args.iter().copied()))
    }

    #[test]
    fn new_collects_answers_in_order() {
        let cli = parse(&[
            "new",
            "out",
            "-a",
            "application=bot-app",
            "--answer",
            "language=java",
            "--dry-run",
        ])
        .unwrap();

        let Commands::New(args) = cli.command else {
            panic!("expected new");
        };
        assert_eq!(args.destination(), PathBuf::from("out"));
        assert_eq!(
            args.answers,
            vec![
                ("application".to_string(), "bot-app".to_string()),
                ("language".to_string(), "java".to_string()),
            ]
        );
        assert!(args.dry_run);
        assert!(!args.non_interactive);
    }

    #[test]
    fn new_defaults_to_current_dir() {
        let Commands::New(args) = parse(&["new"]).unwrap().command else {
            panic!("expected new");
        };
        assert_eq!(args.destination(), PathBuf::from("."));
    }

    #[test]
    fn answer_value_may_contain_equals() {
        assert_eq!(
            parse_answer("appId=a=b").unwrap(),
            ("appId".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn malformed_answers_are_rejected() {
        assert!(parse_answer("application").is_err());
        assert!(parse_answer("=bot-app").is_err());
        assert!(parse(&["new", "-a", "nonsense"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(parse(&["-q", "-v", "check"]).is_err());
    }

    #[test]
    fn questions_format_defaults_to_table() {
        let Commands::Questions(args) = parse(&["questions"]).unwrap().command else {
            panic!("expected questions");
        };
        assert_eq!(args.format, ListFormat::Table);
    }
}
