//! errors.rs - Custom error types for the rulesplit-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `rulesplit-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RulesplitError {
    #[error("Rule '{0}': pattern must use global matching")]
    NonGlobalPattern(String),

    #[error("Rule '{0}': unsupported pattern flag '{1}'")]
    InvalidPatternFlag(String, char),

    #[error("Failed to compile rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}': '{1}' is not a /source/flags pattern literal")]
    MalformedLiteral(String, String),

    #[error("Failed to compile {} rule(s):\n{}", .0.len(), join_errors(.0))]
    InvalidRules(Vec<RulesplitError>),

    #[error("Replacer for rule '{rule}' failed: {source}")]
    Replacer {
        rule: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RulesplitError {
    /// Returns `true` for errors raised while validating a rule list, before
    /// any text was processed.
    pub fn is_validation(&self) -> bool {
        match self {
            RulesplitError::NonGlobalPattern(_)
            | RulesplitError::InvalidPatternFlag(..)
            | RulesplitError::RuleCompilationError(..)
            | RulesplitError::PatternLengthExceeded(..)
            | RulesplitError::MalformedLiteral(..) => true,
            RulesplitError::InvalidRules(errors) => errors.iter().all(|e| e.is_validation()),
            RulesplitError::Replacer { .. } => false,
        }
    }
}

fn join_errors(errors: &[RulesplitError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}
