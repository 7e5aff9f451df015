//! Query normalization.

use pantry_core::{normalize_text, tokenize};

/// A raw query reduced to the forms the retriever and scorer consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Trimmed, lowercased query text with punctuation kept. Used for the
    /// phrase and preparation-method signals.
    pub text: String,
    /// Lowercased, punctuation-stripped, whitespace-collapsed text. Compared
    /// for equality against `FoodRecord::normalized_name`.
    pub normalized: String,
    /// Whitespace-separated terms of `normalized`.
    pub terms: Vec<String>,
}

impl NormalizedQuery {
    /// Normalize a raw query. Pure and deterministic.
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let normalized = normalize_text(&text);
        let terms = tokenize(&normalized);
        Self {
            text,
            normalized,
            terms,
        }
    }

    /// Length of the trimmed query in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the query is long enough to be sent to any provider.
    pub fn is_searchable(&self, min_len: usize) -> bool {
        self.char_len() >= min_len
    }

    /// Text sent to providers: the normalized phrase, or the trimmed text
    /// when normalization strips everything.
    pub fn provider_text(&self) -> &str {
        if self.normalized.is_empty() {
            &self.text
        } else {
            &self.normalized
        }
    }

    /// First query term, if any.
    pub fn first_term(&self) -> Option<&str> {
        self.terms.first().map(String::as_str)
    }
}
