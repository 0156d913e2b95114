//! This file defines the command-line interface (CLI) for the rulesplit application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::output_format::OutputFormat;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "rulesplit",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply ordered replacement rules to text",
    long_about = "rulesplit splits text into literal fragments and replacement content by applying an ordered list of pattern rules. Each rule only sees text that earlier rules left untouched. Input can be given directly or looked up in a translation catalog.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `rulesplit` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Applies the rules to text from an argument, a file, or stdin.
    #[command(about = "Apply the rules to text from an argument, a file, or stdin.")]
    Apply(ApplyCommand),

    /// Looks up a message in a translation catalog and applies the rules to it.
    #[command(about = "Look up a translated message and apply the rules to it.")]
    Translate(TranslateCommand),

    /// Lists the active rules in application order.
    #[command(about = "List the active rules in application order.")]
    Rules(RuleOptions),
}

/// Options selecting which rules are active.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleOptions {
    /// Path to a rule configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "RULESPLIT_CONFIG", help = "Path to a rule configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Do not load the built-in rules.
    #[arg(long = "no-defaults", help = "Do not load the built-in rules.")]
    pub no_defaults: bool,

    /// Explicitly enable these rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

/// Options controlling how a sequence is written.
#[derive(Args, Debug, Clone)]
pub struct RenderOptions {
    /// Output format.
    #[arg(long = "format", short = 'f', value_enum, default_value = "auto", help = "Output format: auto, plain, ansi or json.")]
    pub format: OutputFormat,

    /// Print how often each rule matched to stderr.
    #[arg(long = "summary", help = "Print how often each rule matched to stderr.")]
    pub summary: bool,
}

/// Arguments for the `apply` command.
#[derive(Parser, Debug)]
pub struct ApplyCommand {
    /// Text to process. Read from --input-file or stdin when omitted.
    #[arg(value_name = "TEXT", conflicts_with = "input_file")]
    pub text: Option<String>,

    /// Path to an input file.
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleOptions,

    #[command(flatten)]
    pub render: RenderOptions,
}

/// Arguments for the `translate` command.
#[derive(Parser, Debug)]
pub struct TranslateCommand {
    /// Path to the translation catalog (YAML, or JSON with a .json extension).
    #[arg(long = "catalog", short = 'c', value_name = "FILE", env = "RULESPLIT_CATALOG", help = "Path to the translation catalog.")]
    pub catalog: PathBuf,

    /// Message key to look up.
    #[arg(long = "id", value_name = "KEY", help = "Message key to look up.")]
    pub id: String,

    /// Locale to translate into.
    #[arg(long = "locale", short = 'l', value_name = "LOCALE", env = "RULESPLIT_LOCALE", help = "Locale to translate into.")]
    pub locale: Option<String>,

    #[command(flatten)]
    pub rules: RuleOptions,

    #[command(flatten)]
    pub render: RenderOptions,
}
