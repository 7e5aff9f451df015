//! Structured record of the decisions taken while answering one query.
//!
//! Provider failures never reach the caller as errors. What happened instead
//! is returned here, next to the hits, and mirrored to `tracing`.

use std::fmt;

use pantry_core::{FoodSearchHit, SearchTier};

/// One decision or swallowed failure, in the order it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchDiagnostic {
    /// Trimmed query shorter than the minimum; no provider was called.
    QueryTooShort { len: usize, min: usize },
    /// Zero limit requested; no provider was called.
    ZeroLimit,
    /// Index reported too few records to be useful.
    IndexUnpopulated,
    /// Population probe failed; the index tier was skipped.
    ProbeFailed { error: String },
    /// Full-text search failed; the index tier yielded nothing.
    FullTextFailed { error: String },
    /// Full-text search returned no rows.
    FullTextEmpty,
    /// Trigram fallback turned off by configuration.
    TrigramDisabled,
    /// Index provider has no trigram search.
    TrigramUnsupported,
    /// Trigram search failed and was treated as empty.
    TrigramFailed { error: String },
    /// Trigram search returned no rows.
    TrigramEmpty,
    /// No live provider configured, or live fallback turned off.
    LiveUnavailable,
    /// Live provider failed and was treated as empty.
    LiveFailed { provider: String, error: String },
    /// Live results dropped because their inferred category did not match.
    CategoryFiltered { removed: usize },
}

impl SearchDiagnostic {
    /// Whether this entry records a swallowed provider failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SearchDiagnostic::ProbeFailed { .. }
                | SearchDiagnostic::FullTextFailed { .. }
                | SearchDiagnostic::TrigramFailed { .. }
                | SearchDiagnostic::LiveFailed { .. }
        )
    }
}

impl fmt::Display for SearchDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDiagnostic::QueryTooShort { len, min } => {
                write!(f, "query too short ({len} < {min} characters)")
            }
            SearchDiagnostic::ZeroLimit => f.write_str("zero result limit requested"),
            SearchDiagnostic::IndexUnpopulated => f.write_str("index is not populated"),
            SearchDiagnostic::ProbeFailed { error } => {
                write!(f, "population probe failed: {error}")
            }
            SearchDiagnostic::FullTextFailed { error } => {
                write!(f, "full-text search failed: {error}")
            }
            SearchDiagnostic::FullTextEmpty => f.write_str("full-text search returned no rows"),
            SearchDiagnostic::TrigramDisabled => f.write_str("trigram fallback disabled"),
            SearchDiagnostic::TrigramUnsupported => {
                f.write_str("trigram search not supported by index provider")
            }
            SearchDiagnostic::TrigramFailed { error } => {
                write!(f, "trigram search failed: {error}")
            }
            SearchDiagnostic::TrigramEmpty => f.write_str("trigram search returned no rows"),
            SearchDiagnostic::LiveUnavailable => f.write_str("live provider unavailable"),
            SearchDiagnostic::LiveFailed { provider, error } => {
                write!(f, "live provider {provider} failed: {error}")
            }
            SearchDiagnostic::CategoryFiltered { removed } => {
                write!(f, "category filter removed {removed} live results")
            }
        }
    }
}

/// Result of a search together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub hits: Vec<FoodSearchHit>,
    /// Tier that produced `hits`; `None` when every tier came back empty.
    pub tier: Option<SearchTier>,
    pub diagnostics: Vec<SearchDiagnostic>,
}

impl SearchOutcome {
    pub fn empty(diagnostics: Vec<SearchDiagnostic>) -> Self {
        Self {
            hits: Vec::new(),
            tier: None,
            diagnostics,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether any provider failure was swallowed on the way.
    pub fn had_failures(&self) -> bool {
        self.diagnostics.iter().any(SearchDiagnostic::is_failure)
    }
}
