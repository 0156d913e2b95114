//! compiler.rs - Validates and compiles replacement rules.
//!
//! Every rule in a list is compiled and checked for global matching before
//! any text is touched. A list with one bad rule is rejected as a whole, so a
//! caller never observes a partially applied rule list.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::errors::RulesplitError;
use crate::pattern::Pattern;
use crate::replacer::Replacer;

/// The pattern half of a [`Rule`], either still textual or already compiled.
#[derive(Debug, Clone)]
pub enum RulePattern {
    /// A bare source, always global. Slashes are ordinary characters.
    Source(String),
    /// A `/source/flags` literal, see [`Pattern::parse_literal`].
    Literal(String),
    /// A bare source with an explicit flag string.
    WithFlags { source: String, flags: String },
    Compiled(Pattern),
}

impl From<&str> for RulePattern {
    fn from(source: &str) -> Self {
        RulePattern::Source(source.to_string())
    }
}

impl From<String> for RulePattern {
    fn from(source: String) -> Self {
        RulePattern::Source(source)
    }
}

impl From<Pattern> for RulePattern {
    fn from(pattern: Pattern) -> Self {
        RulePattern::Compiled(pattern)
    }
}

/// A single pattern/replacer pair, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    /// Label used in errors, logs and summaries. Defaults to the pattern text.
    pub name: String,
    pub pattern: RulePattern,
    /// `None` selects [`Replacer::Highlight`].
    pub replacer: Option<Replacer<T>>,
}

impl<T> Rule<T> {
    /// A rule with the default highlight replacer.
    pub fn new(pattern: impl Into<RulePattern>) -> Self {
        let pattern = pattern.into();
        let name = match &pattern {
            RulePattern::Source(source) | RulePattern::Literal(source) => source.clone(),
            RulePattern::WithFlags { source, flags } => format!("/{}/{}", source, flags),
            RulePattern::Compiled(compiled) => compiled.to_string(),
        };
        Self {
            name,
            pattern,
            replacer: None,
        }
    }

    /// A rule from a `/source/flags` literal, with the default highlight replacer.
    pub fn literal(literal: impl Into<String>) -> Self {
        Self::new(RulePattern::Literal(literal.into()))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_replacer(mut self, replacer: Replacer<T>) -> Self {
        self.replacer = Some(replacer);
        self
    }
}

/// A validated rule: its pattern is known to be global.
#[derive(Debug, Clone)]
pub struct CompiledRule<T> {
    name: String,
    pattern: Pattern,
    replacer: Replacer<T>,
}

impl<T> CompiledRule<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn replacer(&self) -> &Replacer<T> {
        &self.replacer
    }
}

/// An ordered list of compiled rules, applied first to last.
#[derive(Debug, Clone)]
pub struct CompiledRules<T> {
    pub rules: Vec<CompiledRule<T>>,
}

impl<T> CompiledRules<T> {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule<T>> {
        self.rules.iter()
    }
}

impl<T> Default for CompiledRules<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

fn compile_rule<T>(rule: Rule<T>) -> Result<CompiledRule<T>, RulesplitError> {
    let pattern = match rule.pattern {
        RulePattern::Source(source) => Pattern::new(&rule.name, &source)?,
        RulePattern::Literal(literal) => Pattern::parse_literal(&rule.name, &literal)?,
        RulePattern::WithFlags { source, flags } => Pattern::with_flags(&rule.name, &source, &flags)?,
        RulePattern::Compiled(pattern) => pattern,
    };

    if !pattern.is_global() {
        return Err(RulesplitError::NonGlobalPattern(rule.name));
    }

    Ok(CompiledRule {
        name: rule.name,
        pattern,
        replacer: rule.replacer.unwrap_or_default(),
    })
}

/// Compiles `rules_to_compile` in order, rejecting the list if any rule is invalid.
///
/// A single failure is returned as-is; several are wrapped in
/// [`RulesplitError::InvalidRules`].
pub fn compile_rules<T>(rules_to_compile: Vec<Rule<T>>) -> Result<CompiledRules<T>, RulesplitError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        let name = rule.name.clone();
        match compile_rule(rule) {
            Ok(compiled) => {
                debug!(
                    target: "rulesplit_core::compiler",
                    "Rule '{}' compiled successfully as {}.",
                    name,
                    compiled.pattern
                );
                compiled_rules.push(compiled);
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    match compilation_errors.len() {
        0 => {
            debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
            Ok(CompiledRules { rules: compiled_rules })
        }
        1 => Err(compilation_errors.remove(0)),
        _ => Err(RulesplitError::InvalidRules(compilation_errors)),
    }
}
