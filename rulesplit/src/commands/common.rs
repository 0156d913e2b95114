// rulesplit/src/commands/common.rs
//! Rule loading and output handling shared by the subcommands.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use rulesplit_core::{merge_rules, RuleConfig, RuleEngine, RuleSummaryItem, Sequence, Span};

use crate::cli::{RenderOptions, RuleOptions};
use crate::ui::output_format::{self, render_sequence};
use crate::ui::rule_table;
use crate::ui::theme::ThemeMap;

/// Location of the per-user rule file, merged when `--config` is not given.
pub fn user_rules_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("rulesplit").join("rules.yaml"))
        .filter(|path| path.is_file())
}

/// Builds the active rule configuration from defaults, a user file and the
/// enable/disable lists.
pub fn load_rule_config(opts: &RuleOptions) -> Result<RuleConfig> {
    let defaults = if opts.no_defaults {
        RuleConfig::default()
    } else {
        RuleConfig::load_default_rules()?
    };

    let user_path = opts.config.clone().or_else(user_rules_path);
    let user_config = match user_path {
        Some(path) => Some(
            RuleConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(defaults, user_config);
    config.set_active_rules(&opts.enable, &opts.disable);
    debug!("{} rule(s) active.", config.rules.len());
    Ok(config)
}

pub fn build_engine(config: &RuleConfig) -> Result<RuleEngine<Span>> {
    RuleEngine::new(config.to_rules()).context("Failed to compile rules")
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Writes a rendered sequence to stdout and, if requested, the rule summary to stderr.
pub fn emit(
    sequence: &Sequence<Span>,
    summary: &[RuleSummaryItem],
    render: &RenderOptions,
    quiet: bool,
    theme: &ThemeMap,
) -> Result<()> {
    let stdout = io::stdout();
    let format = render.format.resolve(stdout.is_terminal());
    let rendered = render_sequence(sequence, format, theme)?;
    {
        let mut writer = stdout.lock();
        writeln!(writer, "{}", rendered)?;
    }
    info!("Rendered {} item(s).", sequence.len());

    if render.summary && !quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        rule_table::print_summary(summary, &mut io::stderr(), theme, stderr_supports_color)?;
    }
    Ok(())
}

/// Drops a single trailing line break, as left by files and pipes.
pub fn trim_line_end(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
