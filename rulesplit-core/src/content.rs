//! content.rs - The content sequence produced by the rule engine.
//!
//! A [`Sequence`] is the input text split into ordered [`ContentItem`]s:
//! literal fragments that later rules may still match, finalized plain-text
//! replacements, and opaque replacement nodes keyed for stable identity.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// One element of a [`Sequence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem<T> {
    /// Source text that has not been replaced. Later rules scan it.
    Literal { text: String },
    /// A plain-text replacement. Rendered as text, never scanned again.
    Text { text: String },
    /// A replacement value. `key` is the matched text followed by the item's
    /// index in the output of the scan that produced it.
    Node { value: T, key: String },
}

impl<T> ContentItem<T> {
    pub fn literal(text: impl Into<String>) -> Self {
        ContentItem::Literal { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    pub fn node(value: T, key: impl Into<String>) -> Self {
        ContentItem::Node {
            value,
            key: key.into(),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ContentItem::Literal { .. })
    }

    pub fn is_node(&self) -> bool {
        matches!(self, ContentItem::Node { .. })
    }

    /// The text of a `Literal` or `Text` item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Literal { text } | ContentItem::Text { text } => Some(text),
            ContentItem::Node { .. } => None,
        }
    }

    pub fn as_node(&self) -> Option<(&T, &str)> {
        match self {
            ContentItem::Node { value, key } => Some((value, key)),
            _ => None,
        }
    }
}

/// What a replacer produces for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement<T> {
    /// Plain text, emitted as a [`ContentItem::Text`].
    Text(String),
    /// A renderable value, emitted as a keyed [`ContentItem::Node`].
    Node(T),
}

impl<T> Replacement<T> {
    pub fn text(text: impl Into<String>) -> Self {
        Replacement::Text(text.into())
    }
}

/// Renderable values that can be built from matched text.
///
/// The default replacer wraps a match with [`Markup::highlight`].
pub trait Markup: Sized {
    fn highlight(text: &str) -> Self;

    fn bold(text: &str) -> Self {
        Self::highlight(text)
    }
}

impl Markup for String {
    fn highlight(text: &str) -> Self {
        text.to_string()
    }
}

/// Visual treatment of a [`Span`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStyle {
    #[default]
    Highlight,
    Bold,
}

/// A minimal styled span, the renderable value used by configured rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl Markup for Span {
    fn highlight(text: &str) -> Self {
        Span::new(text, SpanStyle::Highlight)
    }

    fn bold(text: &str) -> Self {
        Span::new(text, SpanStyle::Bold)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered content items, in order of appearance in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T> {
    items: Vec<ContentItem<T>>,
}

impl<T> Sequence<T> {
    /// A sequence holding `text` as a single literal.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            items: vec![ContentItem::literal(text)],
        }
    }

    pub fn items(&self) -> &[ContentItem<T>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ContentItem<T>> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentItem<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Values of all `Node` items, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|item| item.as_node().map(|(value, _)| value))
    }

    /// Concatenation of every `Literal` and `Text` item. Nodes contribute nothing.
    pub fn literal_text(&self) -> String {
        self.items.iter().filter_map(ContentItem::as_text).collect()
    }

    /// Concatenates the sequence, rendering each node with `render`.
    pub fn render_with<F>(&self, mut render: F) -> String
    where
        F: FnMut(&T, &str) -> String,
    {
        let mut out = String::new();
        for item in &self.items {
            match item {
                ContentItem::Literal { text } | ContentItem::Text { text } => out.push_str(text),
                ContentItem::Node { value, key } => out.push_str(&render(value, key)),
            }
        }
        out
    }
}

impl<T: fmt::Display> Sequence<T> {
    /// Concatenates the sequence using each node's `Display` output.
    pub fn to_plain_string(&self) -> String {
        self.render_with(|value, _| value.to_string())
    }
}

impl<T> From<Vec<ContentItem<T>>> for Sequence<T> {
    fn from(items: Vec<ContentItem<T>>) -> Self {
        Self { items }
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = ContentItem<T>;
    type IntoIter = std::vec::IntoIter<ContentItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a ContentItem<T>;
    type IntoIter = std::slice::Iter<'a, ContentItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
