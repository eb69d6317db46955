//! Canonical text form used for search comparison.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

const COMBINING_DIACRITICALS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Lowercases, decomposes (NFD), drops combining diacritical marks and trims.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_DIACRITICALS.contains(c))
        .collect();
    stripped.trim().to_string()
}

pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// A search term as typed, paired with its canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    canonical: String,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        let raw = term.into();
        let canonical = normalize(&raw);
        Self { raw, canonical }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// True when nothing is left to filter on after normalization.
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Pagination is suspended whenever the typed term has visible text.
    pub fn suspends_pagination(&self) -> bool {
        !self.raw.trim().is_empty()
    }

    /// Prefix match on the name, substring match on the category.
    pub fn matches(&self, name: &str, category: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        normalize(name).starts_with(&self.canonical) || normalize(category).contains(&self.canonical)
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
