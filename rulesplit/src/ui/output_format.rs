// rulesplit/src/ui/output_format.rs
//! Rendering of content sequences and status messages.

use anyhow::{Context, Result};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use std::io::Write;

use rulesplit_core::{ContentItem, Sequence, Span, SpanStyle};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

/// How a sequence is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `ansi` on a terminal, `plain` otherwise.
    Auto,
    /// Replacement text without styling.
    Plain,
    /// Replacements coloured according to the theme.
    Ansi,
    /// The sequence as a JSON array of items.
    Json,
}

impl OutputFormat {
    /// Resolves `Auto` against whether the destination is a terminal.
    pub fn resolve(self, is_terminal: bool) -> OutputFormat {
        match self {
            OutputFormat::Auto if is_terminal => OutputFormat::Ansi,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        }
    }
}

/// Renders `sequence` in `format`. `Auto` renders as plain text.
pub fn render_sequence(sequence: &Sequence<Span>, format: OutputFormat, theme: &ThemeMap) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(sequence).context("Failed to serialize sequence"),
        OutputFormat::Ansi => Ok(render_ansi(sequence, theme)),
        OutputFormat::Plain | OutputFormat::Auto => Ok(sequence.to_plain_string()),
    }
}

fn render_ansi(sequence: &Sequence<Span>, theme: &ThemeMap) -> String {
    let mut out = String::new();
    for item in sequence {
        match item {
            ContentItem::Literal { text } => out.push_str(text),
            ContentItem::Text { text } => {
                out.push_str(&text.color(color_for(theme, ThemeEntry::ReplacedText)).to_string());
            }
            ContentItem::Node { value, .. } => {
                let styled = match value.style {
                    SpanStyle::Highlight => value
                        .text
                        .color(color_for(theme, ThemeEntry::Highlight))
                        .to_string(),
                    SpanStyle::Bold => value
                        .text
                        .color(color_for(theme, ThemeEntry::Bold))
                        .bold()
                        .to_string(),
                };
                out.push_str(&styled);
            }
        }
    }
    out
}

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    message: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let line = format!("{}{}", prefix, message);
    if supports_color {
        writeln!(writer, "{}", line.color(color_for(theme, entry)))?;
    } else {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    print_message(writer, "", message, ThemeEntry::Info, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    print_message(writer, "Warning: ", message, ThemeEntry::Warn, theme, supports_color)
}
