// rulesplit/src/main.rs
//! rulesplit entry point.

use anyhow::{Context, Result};
use clap::Parser;

use rulesplit::cli::{Cli, Commands};
use rulesplit::commands::{apply::run_apply, rules::run_rules, translate::run_translate};
use rulesplit::logger;
use rulesplit::ui::theme::build_theme_map;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let theme_map = build_theme_map(args.theme.as_ref()).context("Theme error")?;

    match &args.command {
        Commands::Apply(cmd) => run_apply(cmd, args.quiet, &theme_map),
        Commands::Translate(cmd) => run_translate(cmd, args.quiet, &theme_map),
        Commands::Rules(opts) => run_rules(opts, &theme_map),
    }
}
