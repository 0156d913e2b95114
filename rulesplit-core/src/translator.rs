// rulesplit-core/src/translator.rs
//! Translation lookup feeding the rule engine.
//!
//! A [`TranslationCatalog`] maps a message key to its text per locale. A
//! [`Translator`] pairs a catalog with a locale resolver and, optionally, a
//! rule engine, and is the explicit object callers construct and own.
//!
//! A missing translation is not an error: it is logged at warn level and an
//! empty string is used instead.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::content::Sequence;
use crate::engine::SegmentationEngine;
use crate::errors::RulesplitError;

/// Message key → locale → translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCatalog {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from YAML, or from JSON when the file ends in `.json`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading translations from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation file {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog: TranslationCatalog = if is_json {
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse translation file {}", path.display()))?
        } else {
            serde_yml::from_str(&text)
                .with_context(|| format!("Failed to parse translation file {}", path.display()))?
        };
        info!("Loaded {} translation keys from {}.", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yml::from_str(text).context("Failed to parse translation catalog")
    }

    pub fn insert(&mut self, key: impl Into<String>, locale: impl Into<String>, text: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .insert(locale.into(), text.into());
    }

    pub fn get(&self, key: &str, locale: &str) -> Option<&str> {
        self.entries.get(key)?.get(locale).map(String::as_str)
    }

    /// The text for `key` in `locale`, or `""` with a warning when absent.
    ///
    /// An empty stored translation counts as missing.
    pub fn lookup(&self, key: &str, locale: &str) -> String {
        match self.get(key, locale) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                warn!("Translation key {} not found for locale {}", key, locale);
                String::new()
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Locales that have a translation for `key`.
    pub fn locales_for(&self, key: &str) -> Vec<&str> {
        self.entries
            .get(key)
            .map(|locales| locales.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves the active locale; `None` means no locale is selected.
pub type LocaleResolver = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// Looks up messages in the active locale and runs them through a rule engine.
pub struct Translator<T> {
    catalog: TranslationCatalog,
    resolve_locale: LocaleResolver,
    engine: Option<Box<dyn SegmentationEngine<T>>>,
}

impl<T> Translator<T> {
    pub fn new(catalog: TranslationCatalog, resolve_locale: LocaleResolver) -> Self {
        Self {
            catalog,
            resolve_locale,
            engine: None,
        }
    }

    /// A translator whose locale never changes.
    pub fn with_locale(catalog: TranslationCatalog, locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self::new(catalog, Box::new(move || Some(locale.clone())))
    }

    /// Uses `engine` for every [`Translator::translate`] call.
    pub fn with_engine(mut self, engine: Box<dyn SegmentationEngine<T>>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn locale(&self) -> Option<String> {
        (self.resolve_locale)()
    }

    /// The message text for `id`; `""` when no locale is active or the key is missing.
    pub fn t(&self, id: &str) -> String {
        match self.locale() {
            Some(locale) => self.catalog.lookup(id, &locale),
            None => String::new(),
        }
    }

    /// The message for `id` as a content sequence.
    ///
    /// Returns `Ok(None)` when no locale is active. Without an engine the
    /// sequence is a single literal holding the text.
    pub fn translate(&self, id: &str) -> Result<Option<Sequence<T>>, RulesplitError> {
        let Some(locale) = self.locale() else {
            debug!("No active locale; '{}' renders nothing.", id);
            return Ok(None);
        };
        let text = self.catalog.lookup(id, &locale);
        let sequence = match &self.engine {
            Some(engine) => engine.segment(&text)?,
            None => Sequence::literal(text),
        };
        Ok(Some(sequence))
    }

    /// Like [`Translator::translate`], with a one-off engine instead of the configured one.
    pub fn translate_with(
        &self,
        id: &str,
        engine: &dyn SegmentationEngine<T>,
    ) -> Result<Option<Sequence<T>>, RulesplitError> {
        match self.locale() {
            Some(locale) => engine.segment(&self.catalog.lookup(id, &locale)).map(Some),
            None => Ok(None),
        }
    }
}

impl<T> fmt::Debug for Translator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("catalog", &self.catalog)
            .field("has_engine", &self.engine.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;

    fn catalog() -> TranslationCatalog {
        let mut catalog = TranslationCatalog::new();
        catalog.insert("greeting", "en", "Hello {name}");
        catalog.insert("greeting", "fr", "Bonjour {name}");
        catalog.insert("blank", "en", "");
        catalog
    }

    #[test]
    fn lookup_returns_the_locale_text() {
        assert_eq!(catalog().lookup("greeting", "fr"), "Bonjour {name}");
    }

    #[test]
    fn lookup_miss_is_empty() {
        let catalog = catalog();
        assert_eq!(catalog.lookup("greeting", "de"), "");
        assert_eq!(catalog.lookup("absent", "en"), "");
        assert_eq!(catalog.lookup("blank", "en"), "");
    }

    #[test]
    fn translate_without_locale_is_none() {
        let translator: Translator<String> = Translator::new(catalog(), Box::new(|| None));
        assert!(translator.translate("greeting").unwrap().is_none());
        assert_eq!(translator.t("greeting"), "");
    }

    #[test]
    fn translate_without_engine_is_one_literal() {
        let translator: Translator<String> = Translator::with_locale(catalog(), "en");
        let sequence = translator.translate("greeting").unwrap().unwrap();
        assert_eq!(sequence.into_items(), vec![ContentItem::literal("Hello {name}")]);
    }

    #[test]
    fn catalog_reads_nested_yaml() {
        let catalog = TranslationCatalog::from_yaml_str("greeting:\n  en: Hi\n  zh: 你好\n").unwrap();
        assert_eq!(catalog.get("greeting", "zh"), Some("你好"));
        assert_eq!(catalog.locales_for("greeting"), vec!["en", "zh"]);
    }
}
