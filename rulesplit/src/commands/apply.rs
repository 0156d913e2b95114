// rulesplit/src/commands/apply.rs
//! The `apply` command: run the active rules over text.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read};

use rulesplit_core::SegmentationEngine;

use crate::cli::ApplyCommand;
use crate::commands::common::{build_engine, emit, load_rule_config, trim_line_end, warn_msg};
use crate::ui::theme::ThemeMap;

fn read_input(cmd: &ApplyCommand) -> Result<String> {
    if let Some(text) = &cmd.text {
        return Ok(text.clone());
    }
    let raw = match &cmd.input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };
    Ok(trim_line_end(raw))
}

pub fn run_apply(cmd: &ApplyCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    let config = load_rule_config(&cmd.rules)?;
    if config.rules.is_empty() && !quiet {
        warn_msg("No rules are active; the input is printed unchanged.", theme);
    }
    let engine = build_engine(&config)?;

    let input = read_input(cmd)?;
    debug!("Applying {} rule(s) to {} byte(s).", engine.compiled_rules().len(), input.len());

    let (sequence, summary) = engine
        .segment_with_summary(&input)
        .context("Failed to apply rules")?;
    emit(&sequence, &summary, &cmd.render, quiet, theme)
}
