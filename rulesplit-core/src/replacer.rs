//! replacer.rs - What a rule puts in place of each match.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

use crate::content::{Markup, Replacement};

/// Signature of a fallible replacer function: the full match and its capture
/// groups (`groups[0]` is capture 1, `None` when the group did not take part).
pub type ReplacerFn<T> = dyn Fn(&str, &[Option<&str>]) -> Result<Replacement<T>> + Send + Sync;

/// How a rule builds the replacement for a match.
pub enum Replacer<T> {
    /// The same replacement for every match.
    Value(Replacement<T>),
    /// A caller-supplied function of the match and its groups.
    Func(Arc<ReplacerFn<T>>),
    /// Wraps the match with [`Markup::highlight`]. Used when a rule sets no replacer.
    Highlight,
    /// Wraps the match with [`Markup::bold`].
    Bold,
}

impl<T: 'static> Replacer<T> {
    pub fn value(replacement: Replacement<T>) -> Self {
        Replacer::Value(replacement)
    }

    /// A function that cannot fail.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&str, &[Option<&str>]) -> Replacement<T> + Send + Sync + 'static,
    {
        Replacer::Func(Arc::new(
            move |whole: &str, groups: &[Option<&str>]| -> Result<Replacement<T>> {
                Ok(f(whole, groups))
            },
        ))
    }

    /// A function whose errors abort the whole replacement call.
    pub fn try_func<F>(f: F) -> Self
    where
        F: Fn(&str, &[Option<&str>]) -> Result<Replacement<T>> + Send + Sync + 'static,
    {
        Replacer::Func(Arc::new(f))
    }
}

impl<T: Clone + Markup> Replacer<T> {
    /// Produces the replacement for one match.
    pub fn apply(&self, whole: &str, groups: &[Option<&str>]) -> Result<Replacement<T>> {
        match self {
            Replacer::Value(replacement) => Ok(replacement.clone()),
            Replacer::Func(f) => f(whole, groups),
            Replacer::Highlight => Ok(Replacement::Node(T::highlight(whole))),
            Replacer::Bold => Ok(Replacement::Node(T::bold(whole))),
        }
    }
}

impl<T> Default for Replacer<T> {
    fn default() -> Self {
        Replacer::Highlight
    }
}

impl<T: Clone> Clone for Replacer<T> {
    fn clone(&self) -> Self {
        match self {
            Replacer::Value(replacement) => Replacer::Value(replacement.clone()),
            Replacer::Func(f) => Replacer::Func(Arc::clone(f)),
            Replacer::Highlight => Replacer::Highlight,
            Replacer::Bold => Replacer::Bold,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Replacer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacer::Value(replacement) => f.debug_tuple("Value").field(replacement).finish(),
            Replacer::Func(_) => f.write_str("Func(..)"),
            Replacer::Highlight => f.write_str("Highlight"),
            Replacer::Bold => f.write_str("Bold"),
        }
    }
}

/// Expands `$n` references in `template` with the match (`$0`) and its groups.
///
/// The longest run of digits after `$` is taken as the index; `$$` yields a
/// literal `$`. References to groups that do not exist or did not take part
/// expand to nothing.
pub fn expand_template(template: &str, whole: &str, groups: &[Option<&str>]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&(_, '$')) => {
                chars.next();
                out.push('$');
            }
            Some(&(_, d)) if d.is_ascii_digit() => {
                let mut index = 0usize;
                while let Some(&(_, d)) = chars.peek() {
                    match d.to_digit(10) {
                        Some(v) => {
                            index = index.saturating_mul(10).saturating_add(v as usize);
                            chars.next();
                        }
                        None => break,
                    }
                }
                if index == 0 {
                    out.push_str(whole);
                } else if let Some(Some(group)) = groups.get(index - 1) {
                    out.push_str(group);
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// Highest `$n` group index referenced by `template`, if any.
pub fn max_group_reference(template: &str) -> Option<usize> {
    let mut max = None;
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            continue;
        }
        if chars.peek() == Some(&'$') {
            chars.next();
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(d);
            chars.next();
        }
        if let Ok(n) = digits.parse::<usize>() {
            max = Some(max.map_or(n, |m: usize| m.max(n)));
        }
    }
    max
}
