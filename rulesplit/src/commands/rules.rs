// rulesplit/src/commands/rules.rs
//! The `rules` command: list the active rules in application order.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;

use crate::cli::RuleOptions;
use crate::commands::common::{build_engine, load_rule_config};
use crate::ui::rule_table;
use crate::ui::theme::ThemeMap;

pub fn run_rules(opts: &RuleOptions, theme: &ThemeMap) -> Result<()> {
    let config = load_rule_config(opts)?;
    // Compiling here surfaces invalid rules the same way `apply` would.
    build_engine(&config)?;
    let rules: Vec<_> = config
        .rules
        .into_iter()
        .filter(|rule| rule.enabled != Some(false))
        .collect();
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    rule_table::print_rules(&rules, &mut stdout.lock(), theme, supports_color)
}
