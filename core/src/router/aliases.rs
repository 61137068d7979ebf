//! Canonical sidebar keys
//!
//! Several page keys share one sidebar highlight: detail views highlight
//! their parent summary entry, and singular/plural spellings of a section
//! ("device" / "devices") normalize to whichever entry exists.

use super::page::PageKey;
use crate::document::ChromeBar;
use std::collections::HashMap;

/// Maps page keys to the chrome entry that represents them
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Add an alias
    pub fn with_alias(mut self, page: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.aliases.insert(page.into(), canonical.into());
        self
    }

    /// Key after applying the explicit alias table
    pub fn canonical<'a>(&'a self, page: &'a PageKey) -> &'a str {
        self.aliases
            .get(page.as_str())
            .map(String::as_str)
            .unwrap_or(page.as_str())
    }

    /// Resolve the entry of `bar` that represents `page`
    pub fn resolve(&self, page: &PageKey, bar: &ChromeBar) -> Option<String> {
        let canonical = self.canonical(page);
        if bar.contains(canonical) {
            return Some(canonical.to_string());
        }

        let variant = match canonical.strip_suffix('s') {
            Some(singular) => singular.to_string(),
            None => format!("{}s", canonical),
        };
        if bar.contains(&variant) {
            return Some(variant);
        }

        None
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
