// File: rulesplit-core/src/headless.rs

//! `headless.rs`
//! One-shot entry points: compile a rule list and apply it in a single call.

use crate::config::RuleConfig;
use crate::content::{Markup, Sequence, Span};
use crate::engine::SegmentationEngine;
use crate::engines::rule_engine::RuleEngine;
use crate::errors::RulesplitError;
use crate::rules::compiler::Rule;

/// Splits `text` by applying `rules` in order.
///
/// The whole rule list is validated first; if any pattern is invalid or not
/// global, the call fails before any rule is applied.
pub fn replace<T>(text: &str, rules: Vec<Rule<T>>) -> Result<Sequence<T>, RulesplitError>
where
    T: Clone + Markup + Send + Sync,
{
    RuleEngine::new(rules)?.segment(text)
}

/// Applies the enabled rules of a configuration to `text`.
pub fn replace_with_config(text: &str, config: &RuleConfig) -> Result<Sequence<Span>, RulesplitError> {
    replace(text, config.to_rules())
}
