//! Configuration management for `rulesplit-core`.
//!
//! This module defines the serializable form of replacement rules. It handles
//! YAML deserialization and provides utilities for loading, merging,
//! filtering and validating rule lists, and for turning them into engine rules.
//!
//! Unlike a set of independent matchers, the rules here form a pipeline: a
//! rule only sees text that no earlier rule replaced. Every operation in this
//! module therefore keeps the rule order intact.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::content::{Replacement, Span, SpanStyle};
use crate::pattern::Pattern;
use crate::replacer::{expand_template, max_group_reference, Replacer};
use crate::rules::compiler::{Rule, RulePattern};

/// A single replacement rule as written in a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Unique identifier for the rule (e.g., "placeholder").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// A regex source. Slashes are ordinary characters.
    pub pattern: Option<String>,
    /// Explicit flags such as `gi`. Must include `g` when set; global when absent.
    pub flags: Option<String>,
    /// Replacement template; `$0` is the match, `$1`.. the capture groups.
    pub replace_with: Option<String>,
    /// When set, matches become styled spans instead of plain text.
    pub style: Option<SpanStyle>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// If true, the rule is inactive unless explicitly enabled.
    pub opt_in: bool,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl RuleSpec {
    fn rule_pattern(&self) -> Option<RulePattern> {
        let source = self.pattern.clone()?;
        Some(match &self.flags {
            Some(flags) => RulePattern::WithFlags {
                source,
                flags: flags.clone(),
            },
            None => RulePattern::Source(source),
        })
    }

    fn replacer(&self) -> Option<Replacer<Span>> {
        match (self.replace_with.clone(), self.style) {
            (None, None) => None,
            (None, Some(SpanStyle::Highlight)) => Some(Replacer::Highlight),
            (None, Some(SpanStyle::Bold)) => Some(Replacer::Bold),
            (Some(template), None) => Some(Replacer::func(move |whole, groups| {
                Replacement::Text(expand_template(&template, whole, groups))
            })),
            (Some(template), Some(style)) => Some(Replacer::func(move |whole, groups| {
                Replacement::Node(Span::new(expand_template(&template, whole, groups), style))
            })),
        }
    }

    /// Converts the spec into an engine rule, or `None` when it has no pattern.
    pub fn to_rule(&self) -> Option<Rule<Span>> {
        let pattern = self.rule_pattern()?;
        let mut rule = Rule::new(pattern).named(self.name.clone());
        rule.replacer = self.replacer();
        Some(rule)
    }
}

/// Represents the top-level rule configuration.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RuleConfig {
    /// Rules in application order.
    pub rules: Vec<RuleSpec>,
}

impl RuleConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Parses and validates rules from a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RuleConfig = serde_yml::from_str(text).context("Failed to parse rule configuration")?;
        validate_rules(&config.rules)?;
        Ok(config)
    }

    /// Loads the built-in rules.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RuleConfig = serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    ///
    /// A rule stays active unless it is disabled, switched off with
    /// `enabled: false`, or opt-in; naming a rule in `enable_rules` overrides
    /// the last two.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let name = rule.name.as_str();
            if disable_set.contains(name) {
                return false;
            }
            let switched_off = rule.opt_in || rule.enabled == Some(false);
            !switched_off || enable_set.contains(name)
        });

        for rule in self.rules.iter_mut() {
            if enable_set.contains(rule.name.as_str()) {
                rule.enabled = Some(true);
            }
        }

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }

    /// Engine rules for every active rule, in order. Opt-in rules count as
    /// active only once `enabled: true` is set on them.
    pub fn to_rules(&self) -> Vec<Rule<Span>> {
        self.rules
            .iter()
            .filter(|spec| match spec.enabled {
                Some(enabled) => enabled,
                None => !spec.opt_in,
            })
            .filter_map(|spec| {
                let rule = spec.to_rule();
                if rule.is_none() {
                    warn!("Skipping rule '{}' because its pattern is missing.", spec.name);
                }
                rule
            })
            .collect()
    }
}

/// Merges user-defined rules with defaults.
///
/// A user rule with the name of a default rule replaces it in place; other
/// user rules are appended in the order they were written.
pub fn merge_rules(default_config: RuleConfig, user_config: Option<RuleConfig>) -> RuleConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("User rule '{}' overrides a default rule.", user_rule.name);
                    *existing = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    RuleConfig { rules: final_rules }
}

/// Validates rule integrity: unique names, compilable global patterns, and
/// replacement templates that only reference existing capture groups.
pub fn validate_rules(rules: &[RuleSpec]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let source = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        let compiled = match &rule.flags {
            Some(flags) => Pattern::with_flags(&rule.name, source, flags),
            None => Pattern::new(&rule.name, source),
        };
        let pattern = match compiled {
            Ok(pattern) => pattern,
            Err(e) => {
                errors.push(e.to_string());
                continue;
            }
        };

        if !pattern.is_global() {
            errors.push(format!("Rule '{}': pattern must use global matching.", rule.name));
        }

        if let Some(template) = &rule.replace_with {
            if let Some(group_num) = max_group_reference(template) {
                if group_num > pattern.group_count() {
                    errors.push(format!(
                        "Rule '{}': replacement references non-existent capture group '${}'.",
                        rule.name, group_num
                    ));
                }
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
