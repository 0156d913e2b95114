// rulesplit-core/src/match_log.rs
//! Per-rule match reporting and debug logging of matched text.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched text may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("RULESPLIT_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// How often one rule matched during a single engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub matched_texts: Vec<String>,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_sensitive(content)
    }
}

pub fn log_match_debug(rule_name: &str, matched: &str, start: usize, end: usize) {
    debug!(
        "Rule '{}' matched '{}' at {}..{}",
        rule_name,
        get_loggable_content(matched),
        start,
        end
    );
}
