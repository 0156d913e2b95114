// rulesplit-core/src/lib.rs
//! # rulesplit Core Library
//!
//! `rulesplit-core` splits a text into an ordered sequence of literal fragments
//! and replacement content by applying an ordered list of pattern rules. Each
//! rule only sees the literal fragments left by the rules before it, so
//! replaced content is never matched twice.
//!
//! The library is pure and stateless: compiled rules carry no scan position
//! and can be shared freely between threads and calls.
//!
//! ## Modules
//!
//! * `pattern`: Global/non-global rule patterns and the stateless match cursor.
//! * `content`: `ContentItem`, `Sequence` and the `Markup` trait for replacement values.
//! * `replacer`: What a rule puts in place of a match.
//! * `rules`: `Rule` definitions and their up-front compilation.
//! * `engine`: The `SegmentationEngine` trait.
//! * `engines`: Concrete engines, currently the rule-folding `RuleEngine`.
//! * `config`: Serializable rule files: loading, merging, filtering, validation.
//! * `translator`: Translation catalogs and the `Translator` front end.
//! * `match_log`: Per-rule match summaries and redacted debug logging.
//! * `headless`: One-shot `replace` entry points.
//!
//! ## Usage Example
//!
//! ```rust
//! use rulesplit_core::{replace, ContentItem, Replacement, Replacer, Rule};
//!
//! fn main() -> Result<(), rulesplit_core::RulesplitError> {
//!     let rules = vec![
//!         Rule::new(r"\{name\}").with_replacer(Replacer::value(Replacement::Node("Alice".to_string()))),
//!         Rule::new(r"(\d+)-(\d+)").with_replacer(Replacer::func(|_, groups| {
//!             Replacement::Text(format!("{}..{}", groups[0].unwrap_or(""), groups[1].unwrap_or("")))
//!         })),
//!     ];
//!
//!     let sequence = replace("{name} read pages 10-20", rules)?;
//!     assert_eq!(sequence.to_plain_string(), "Alice read pages 10..20");
//!     assert!(matches!(sequence.items()[0], ContentItem::Node { .. }));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Engine operations return [`RulesplitError`]. Configuration loading uses
//! `anyhow::Error` with context describing the file being read.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod match_log;
pub mod pattern;
pub mod replacer;
pub mod rules;
pub mod translator;

/// Re-exports the rule configuration types.
pub use config::{merge_rules, validate_rules, RuleConfig, RuleSpec};

/// Re-exports the custom error type for clear error reporting.
pub use errors::RulesplitError;

/// Re-exports the content model.
pub use content::{ContentItem, Markup, Replacement, Sequence, Span, SpanStyle};

pub use engine::SegmentationEngine;
pub use engines::rule_engine::{scan, RuleEngine};

pub use pattern::{Pattern, PatternFlags, MAX_PATTERN_LENGTH};
pub use replacer::{expand_template, Replacer};
pub use rules::compiler::{compile_rules, CompiledRule, CompiledRules, Rule, RulePattern};

pub use match_log::RuleSummaryItem;
pub use translator::{LocaleResolver, TranslationCatalog, Translator};

/// Re-exports the one-shot entry points.
pub use headless::{replace, replace_with_config};
