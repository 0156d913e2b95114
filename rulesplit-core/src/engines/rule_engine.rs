// rulesplit-core/src/engines/rule_engine.rs
//! A `SegmentationEngine` that folds an ordered rule list over a text.
//!
//! The engine starts from one literal holding the whole input. Each rule in
//! turn scans every literal left by the previous rules and splits it at its
//! matches; replacement items are carried forward untouched.
//! License: MIT OR APACHE 2.0

use log::debug;
use std::sync::Arc;

use crate::content::{ContentItem, Markup, Replacement, Sequence};
use crate::engine::SegmentationEngine;
use crate::errors::RulesplitError;
use crate::match_log::{log_match_debug, RuleSummaryItem};
use crate::rules::compiler::{compile_rules, CompiledRule, CompiledRules, Rule};

#[derive(Debug)]
pub struct RuleEngine<T> {
    compiled_rules: Arc<CompiledRules<T>>,
}

impl<T> Clone for RuleEngine<T> {
    fn clone(&self) -> Self {
        Self {
            compiled_rules: Arc::clone(&self.compiled_rules),
        }
    }
}

impl<T: Clone + Markup> RuleEngine<T> {
    /// Compiles `rules` and builds an engine from them.
    pub fn new(rules: Vec<Rule<T>>) -> Result<Self, RulesplitError> {
        let compiled = compile_rules(rules)?;
        Ok(Self::from_compiled(Arc::new(compiled)))
    }

    pub fn from_compiled(compiled_rules: Arc<CompiledRules<T>>) -> Self {
        Self { compiled_rules }
    }

    fn fold(
        &self,
        text: &str,
        mut summary: Option<&mut Vec<RuleSummaryItem>>,
    ) -> Result<Sequence<T>, RulesplitError> {
        let mut items = vec![ContentItem::literal(text)];

        for rule in self.compiled_rules.iter() {
            let mut matched = Vec::new();
            let mut next = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    ContentItem::Literal { text } => {
                        next.extend(scan_collecting(&text, rule, &mut matched)?);
                    }
                    other => next.push(other),
                }
            }
            debug!(
                "Rule '{}' matched {} time(s); sequence now has {} item(s).",
                rule.name(),
                matched.len(),
                next.len()
            );
            if let Some(summary) = summary.as_mut() {
                summary.push(RuleSummaryItem {
                    rule_name: rule.name().to_string(),
                    occurrences: matched.len(),
                    matched_texts: matched,
                });
            }
            items = next;
        }

        Ok(Sequence::from(items))
    }
}

impl<T> SegmentationEngine<T> for RuleEngine<T>
where
    T: Clone + Markup + Send + Sync,
{
    fn segment(&self, text: &str) -> Result<Sequence<T>, RulesplitError> {
        self.fold(text, None)
    }

    fn segment_with_summary(
        &self,
        text: &str,
    ) -> Result<(Sequence<T>, Vec<RuleSummaryItem>), RulesplitError> {
        let mut summary = Vec::with_capacity(self.compiled_rules.len());
        let sequence = self.fold(text, Some(&mut summary))?;
        Ok((sequence, summary))
    }

    fn compiled_rules(&self) -> &CompiledRules<T> {
        &self.compiled_rules
    }
}

/// Splits one literal string at every match of `rule`.
///
/// Text before, between and after matches becomes `Literal` items; empty gaps
/// produce nothing. Each match becomes exactly one `Text` or `Node` item. A
/// node's key is the matched text followed by the number of items already
/// emitted by this scan. An empty `text` yields no items.
pub fn scan<T: Clone + Markup>(
    text: &str,
    rule: &CompiledRule<T>,
) -> Result<Vec<ContentItem<T>>, RulesplitError> {
    let mut matched = Vec::new();
    scan_collecting(text, rule, &mut matched)
}

fn scan_collecting<T: Clone + Markup>(
    text: &str,
    rule: &CompiledRule<T>,
    matched: &mut Vec<String>,
) -> Result<Vec<ContentItem<T>>, RulesplitError> {
    let mut out = Vec::new();
    let mut last_end = 0usize;
    let mut cursor = 0usize;

    while cursor < text.len() {
        let Some((captures, next_cursor)) = rule.pattern().next_match(text, cursor) else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        if whole.start() > last_end {
            out.push(ContentItem::literal(&text[last_end..whole.start()]));
        }

        let groups: Vec<Option<&str>> = captures
            .iter()
            .skip(1)
            .map(|group| group.map(|m| m.as_str()))
            .collect();

        log_match_debug(rule.name(), whole.as_str(), whole.start(), whole.end());

        let replacement = rule
            .replacer()
            .apply(whole.as_str(), &groups)
            .map_err(|source| RulesplitError::Replacer {
                rule: rule.name().to_string(),
                source,
            })?;

        match replacement {
            Replacement::Text(replaced) => out.push(ContentItem::text(replaced)),
            Replacement::Node(value) => {
                let key = format!("{}{}", whole.as_str(), out.len());
                out.push(ContentItem::node(value, key));
            }
        }

        matched.push(whole.as_str().to_string());
        last_end = whole.end();
        cursor = next_cursor;
    }

    if last_end < text.len() {
        out.push(ContentItem::literal(&text[last_end..]));
    }

    Ok(out)
}
