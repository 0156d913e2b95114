// rulesplit/src/ui/rule_table.rs
//! Tables for rule listings and per-rule match summaries.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::Write;

use rulesplit_core::{RuleSpec, RuleSummaryItem, SpanStyle};

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn table_color(theme: &ThemeMap, entry: ThemeEntry) -> Color {
    use owo_colors::AnsiColors;
    match color_for(theme, entry) {
        AnsiColors::Black => Color::Black,
        AnsiColors::Red => Color::DarkRed,
        AnsiColors::Green => Color::DarkGreen,
        AnsiColors::Yellow => Color::DarkYellow,
        AnsiColors::Blue => Color::DarkBlue,
        AnsiColors::Magenta => Color::DarkMagenta,
        AnsiColors::Cyan => Color::DarkCyan,
        AnsiColors::White => Color::Grey,
        AnsiColors::BrightBlack => Color::DarkGrey,
        AnsiColors::BrightRed => Color::Red,
        AnsiColors::BrightGreen => Color::Green,
        AnsiColors::BrightYellow => Color::Yellow,
        AnsiColors::BrightBlue => Color::Blue,
        AnsiColors::BrightMagenta => Color::Magenta,
        AnsiColors::BrightCyan => Color::Cyan,
        _ => Color::White,
    }
}

fn new_table(header: &[&str], supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    if !supports_color {
        table.force_no_tty();
    }
    table
}

fn style_label(rule: &RuleSpec) -> &'static str {
    match (rule.style, rule.replace_with.is_some()) {
        (Some(SpanStyle::Bold), _) => "bold",
        (Some(SpanStyle::Highlight), _) | (None, false) => "highlight",
        (None, true) => "text",
    }
}

/// Writes the rules in application order.
pub fn print_rules<W: Write>(rules: &[RuleSpec], writer: &mut W, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    let mut table = new_table(&["#", "Rule", "Pattern", "Output", "Replace with"], supports_color);
    for (index, rule) in rules.iter().enumerate() {
        let pattern = match (&rule.pattern, &rule.flags) {
            (Some(p), Some(flags)) => format!("/{}/{}", p, flags),
            (Some(p), None) => p.clone(),
            (None, _) => String::new(),
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&rule.name).fg(table_color(theme, ThemeEntry::SummaryRuleName)),
            Cell::new(pattern),
            Cell::new(style_label(rule)),
            Cell::new(rule.replace_with.as_deref().unwrap_or("-")),
        ]);
    }
    writeln!(writer, "{}", table)?;
    Ok(())
}

/// Writes how often each rule matched.
pub fn print_summary<W: Write>(
    summary: &[RuleSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    let mut table = new_table(&["Rule", "Matches"], supports_color);
    for item in summary {
        table.add_row(vec![
            Cell::new(&item.rule_name).fg(table_color(theme, ThemeEntry::SummaryRuleName)),
            Cell::new(item.occurrences).fg(table_color(theme, ThemeEntry::SummaryOccurrences)),
        ]);
    }
    writeln!(writer, "{}", table)?;
    Ok(())
}
