// rulesplit/src/commands/translate.rs
//! The `translate` command: look up a catalog message and run the rules over it.

use anyhow::{Context, Result};
use log::debug;

use rulesplit_core::{SegmentationEngine, Span, TranslationCatalog, Translator};

use crate::cli::TranslateCommand;
use crate::commands::common::{build_engine, emit, info_msg, load_rule_config};
use crate::ui::theme::ThemeMap;

pub fn run_translate(cmd: &TranslateCommand, quiet: bool, theme: &ThemeMap) -> Result<()> {
    let catalog = TranslationCatalog::load_from_file(&cmd.catalog)?;
    let config = load_rule_config(&cmd.rules)?;
    let engine = build_engine(&config)?;

    let locale = cmd.locale.clone().filter(|l| !l.is_empty());
    let translator: Translator<Span> = Translator::new(catalog, Box::new(move || locale.clone()));

    let Some(locale) = translator.locale() else {
        if !quiet {
            info_msg("No locale selected; nothing to render.", theme);
        }
        return Ok(());
    };
    debug!("Translating '{}' into '{}'.", cmd.id, locale);

    let text = translator.t(&cmd.id);
    let (sequence, summary) = engine
        .segment_with_summary(&text)
        .with_context(|| format!("Failed to apply rules to message '{}'", cmd.id))?;
    emit(&sequence, &summary, &cmd.render, quiet, theme)
}
