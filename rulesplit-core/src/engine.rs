// rulesplit-core/src/engine.rs
//! Defines the core SegmentationEngine trait.
//!
//! The `SegmentationEngine` trait is the contract between callers that need a
//! text split into literal fragments and replacement content, and the engines
//! that perform the split.
//!
//! License: MIT OR APACHE 2.0

use crate::content::Sequence;
use crate::errors::RulesplitError;
use crate::match_log::RuleSummaryItem;
use crate::rules::compiler::CompiledRules;

/// A trait that defines the core functionality of a segmentation engine.
pub trait SegmentationEngine<T>: Send + Sync {
    /// Applies every rule, in order, to `text`.
    ///
    /// The result is a fresh [`Sequence`]. Content produced by one rule is
    /// never scanned by a later one. Fails only when a replacer function fails.
    fn segment(&self, text: &str) -> Result<Sequence<T>, RulesplitError>;

    /// Like [`SegmentationEngine::segment`], also reporting how often each rule
    /// matched. The summary lists every rule, in rule order.
    fn segment_with_summary(
        &self,
        text: &str,
    ) -> Result<(Sequence<T>, Vec<RuleSummaryItem>), RulesplitError>;

    /// Returns the rules used by the engine.
    fn compiled_rules(&self) -> &CompiledRules<T>;
}
