//! pattern.rs - Rule patterns and their matching flags.
//!
//! A bare regular expression source is always compiled for global matching,
//! whatever characters it contains. Slash literals such as `/(\d+)-(\d+)/gi`
//! are only read through [`Pattern::parse_literal`], which takes the flags
//! exactly as written. Only global patterns may be used by the rule engine.
//!
//! Scanning is stateless: [`Pattern::next_match`] receives the cursor to search
//! from and hands back the cursor for the following search, so one compiled
//! pattern can be shared between threads and invocations.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Captures, Regex, RegexBuilder};
use std::fmt;

use crate::errors::RulesplitError;

/// Maximum allowed length for a pattern source string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Upper bound on the compiled size of a single pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Flags controlling how a pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternFlags {
    /// `g`: find every non-overlapping occurrence.
    pub global: bool,
    /// `i`: case-insensitive matching.
    pub ignore_case: bool,
    /// `m`: `^` and `$` match at line boundaries.
    pub multi_line: bool,
    /// `s`: `.` also matches `\n`.
    pub dot_all: bool,
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self {
            global: true,
            ignore_case: false,
            multi_line: false,
            dot_all: false,
        }
    }
}

impl PatternFlags {
    /// Flags with every option off, including `global`.
    pub fn none() -> Self {
        Self {
            global: false,
            ..Self::default()
        }
    }

    /// Parses a flag string such as `"gim"`.
    ///
    /// `rule_name` is only used to label the error. Repeated flags are accepted.
    /// `u` is accepted and ignored: matching is always Unicode-aware.
    pub fn parse(rule_name: &str, flags: &str) -> Result<Self, RulesplitError> {
        let mut parsed = Self::none();
        for flag in flags.chars() {
            match flag {
                'g' => parsed.global = true,
                'i' => parsed.ignore_case = true,
                'm' => parsed.multi_line = true,
                's' => parsed.dot_all = true,
                'u' => {}
                other => {
                    return Err(RulesplitError::InvalidPatternFlag(rule_name.to_string(), other));
                }
            }
        }
        Ok(parsed)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (set, flag) in [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
        ] {
            if set {
                write!(f, "{}", flag)?;
            }
        }
        Ok(())
    }
}

/// A compiled rule pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    flags: PatternFlags,
}

impl Pattern {
    /// Compiles `source` as written, with the global flag.
    pub fn new(rule_name: &str, source: &str) -> Result<Self, RulesplitError> {
        Self::build(rule_name, source, PatternFlags::default())
    }

    /// Parses a `/source/flags` literal. The flags are exactly those after the
    /// last `/`, so `/x/` and `/x/i` are not global.
    pub fn parse_literal(rule_name: &str, literal: &str) -> Result<Self, RulesplitError> {
        let (source, flags) = split_literal(literal)
            .ok_or_else(|| RulesplitError::MalformedLiteral(rule_name.to_string(), literal.to_string()))?;
        Self::with_flags(rule_name, source, flags)
    }

    /// Compiles `source` with the given flag string.
    pub fn with_flags(rule_name: &str, source: &str, flags: &str) -> Result<Self, RulesplitError> {
        let flags = PatternFlags::parse(rule_name, flags)?;
        Self::build(rule_name, source, flags)
    }

    /// Wraps an already compiled regular expression.
    pub fn from_regex(regex: Regex, global: bool) -> Self {
        Self {
            regex,
            flags: PatternFlags {
                global,
                ..PatternFlags::none()
            },
        }
    }

    fn build(rule_name: &str, source: &str, flags: PatternFlags) -> Result<Self, RulesplitError> {
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(RulesplitError::PatternLengthExceeded(
                rule_name.to_string(),
                source.len(),
                MAX_PATTERN_LENGTH,
            ));
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| RulesplitError::RuleCompilationError(rule_name.to_string(), e))?;

        debug!("Compiled pattern for rule '{}' with flags '{}'.", rule_name, flags);
        Ok(Self { regex, flags })
    }

    pub fn is_global(&self) -> bool {
        self.flags.global
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The pattern source as written, without slashes or flags.
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Finds the first match starting at or after byte offset `cursor`.
    ///
    /// Returns the captures and the cursor for the next search. After an empty
    /// match the next cursor skips one character, so repeated calls always
    /// make progress. Anchors and word boundaries see the whole of `text`.
    pub fn next_match<'t>(&self, text: &'t str, cursor: usize) -> Option<(Captures<'t>, usize)> {
        if cursor > text.len() {
            return None;
        }
        let captures = self.regex.captures_at(text, cursor)?;
        let whole = captures.get(0)?;
        let next = if whole.end() > whole.start() {
            whole.end()
        } else {
            next_char_boundary(text, whole.end())
        };
        Some((captures, next))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.regex.as_str(), self.flags)
    }
}

/// Splits `/source/flags` at the last `/`.
fn split_literal(literal: &str) -> Option<(&str, &str)> {
    let body = literal.strip_prefix('/')?;
    let close = body.rfind('/')?;
    Some((&body[..close], &body[close + 1..]))
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(pos + 1, |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_source_is_global() {
        let p = Pattern::new("digits", r"\d+").unwrap();
        assert!(p.is_global());
        assert_eq!(p.source(), r"\d+");
        assert_eq!(p.to_string(), r"/\d+/g");
    }

    #[test]
    fn literal_without_g_is_not_global() {
        let p = Pattern::parse_literal("digits", r"/\d+/").unwrap();
        assert!(!p.is_global());
        let p = Pattern::parse_literal("digits", r"/\d+/i").unwrap();
        assert!(!p.is_global());
        assert!(p.flags().ignore_case);
    }

    #[test]
    fn literal_flags_are_applied() {
        let p = Pattern::parse_literal("word", "/hello/gi").unwrap();
        assert!(p.is_global());
        assert!(p.regex().is_match("HeLLo"));
    }

    #[test]
    fn slashes_in_a_bare_source_are_plain_text() {
        for source in ["/usr/local/bin", "/api/", "/usr/bin/gsm", "//"] {
            let p = Pattern::new("path", source).unwrap();
            assert!(p.is_global(), "{}", source);
            assert_eq!(p.source(), source);
            assert!(p.regex().is_match(&format!("x {} y", source)));
        }
    }

    #[test]
    fn literal_with_unknown_flags_is_rejected() {
        let err = Pattern::parse_literal("path", "/usr/local/bin").unwrap_err();
        assert!(matches!(err, RulesplitError::InvalidPatternFlag(_, 'b')));
    }

    #[test]
    fn literal_needs_both_slashes() {
        let err = Pattern::parse_literal("bare", "abc").unwrap_err();
        assert!(matches!(err, RulesplitError::MalformedLiteral(ref name, _) if name == "bare"));
        assert!(err.is_validation());
    }

    #[test]
    fn unicode_flag_is_accepted_without_effect() {
        let p = Pattern::parse_literal("u", "/é/gu").unwrap();
        assert_eq!(p.flags(), PatternFlags::default());
        assert_eq!(p.to_string(), "/é/g");
    }

    #[test]
    fn sticky_flag_is_rejected() {
        let err = Pattern::parse_literal("sticky", "/a/gy").unwrap_err();
        assert!(matches!(err, RulesplitError::InvalidPatternFlag(ref name, 'y') if name == "sticky"));
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let source = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = Pattern::new("long", &source).unwrap_err();
        assert!(matches!(err, RulesplitError::PatternLengthExceeded(_, len, MAX_PATTERN_LENGTH) if len == MAX_PATTERN_LENGTH + 1));
    }

    #[test]
    fn invalid_regex_is_a_compilation_error() {
        let err = Pattern::new("broken", "(unclosed").unwrap_err();
        assert!(matches!(err, RulesplitError::RuleCompilationError(..)));
        assert!(err.is_validation());
    }

    #[test]
    fn next_match_walks_every_occurrence() {
        let p = Pattern::new("digits", r"\d").unwrap();
        let text = "a1b2";
        let (caps, next) = p.next_match(text, 0).unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "1");
        assert_eq!(next, 2);
        let (caps, next) = p.next_match(text, next).unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "2");
        assert_eq!(next, 4);
        assert!(p.next_match(text, next).is_none());
    }

    #[test]
    fn empty_match_advances_by_one_character() {
        let p = Pattern::new("empty", "x*").unwrap();
        let (caps, next) = p.next_match("éa", 0).unwrap();
        assert_eq!(caps.get(0).unwrap().as_str(), "");
        assert_eq!(next, 'é'.len_utf8());
    }

    #[test]
    fn anchors_respect_the_full_text() {
        let p = Pattern::new("start", "^a").unwrap();
        assert!(p.next_match("aa", 1).is_none());
    }
}
