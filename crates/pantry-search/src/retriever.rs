//! Candidate retrieval from the index provider.
//!
//! Full-text search runs first. Only when it succeeds with zero rows does the
//! retriever try trigram similarity, and a trigram failure of any kind is
//! reported as an empty result rather than an error.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use pantry_core::{Error, FoodCategory, FoodRecord, IndexProvider, Result};

use crate::diagnostics::SearchDiagnostic;
use crate::normalizer::NormalizedQuery;

/// Which retrieval path produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalPath {
    FullText,
    Trigram,
    /// Both paths came back empty (or trigram was skipped or failed).
    Empty,
}

impl RetrievalPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetrievalPath::FullText => "full_text",
            RetrievalPath::Trigram => "trigram",
            RetrievalPath::Empty => "empty",
        }
    }
}

/// Unscored candidates and the path that found them.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub records: Vec<FoodRecord>,
    pub path: RetrievalPath,
}

impl Retrieval {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            path: RetrievalPath::Empty,
        }
    }
}

/// Fetches unscored candidates, full-text first, trigram second.
#[derive(Clone)]
pub struct CandidateRetriever {
    index: Arc<dyn IndexProvider>,
    trigram_fallback: bool,
}

impl CandidateRetriever {
    pub fn new(index: Arc<dyn IndexProvider>) -> Self {
        Self {
            index,
            trigram_fallback: true,
        }
    }

    /// Enable or disable the trigram fallback path.
    pub fn with_trigram_fallback(mut self, enabled: bool) -> Self {
        self.trigram_fallback = enabled;
        self
    }

    /// Retrieve at most `max_rows` candidates.
    ///
    /// A full-text error propagates. The category, when given, is passed to
    /// the provider so it filters inside the query.
    pub async fn retrieve(
        &self,
        query: &NormalizedQuery,
        category: Option<FoodCategory>,
        max_rows: usize,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Result<Retrieval> {
        let text = query.provider_text();

        let fts_start = Instant::now();
        let mut records = self.index.full_text_search(text, category, max_rows).await?;
        debug!(
            retrieval_path = "full_text",
            candidate_count = records.len(),
            duration_ms = fts_start.elapsed().as_millis() as u64,
            "Full-text retrieval complete"
        );

        if !records.is_empty() {
            records.truncate(max_rows);
            return Ok(Retrieval {
                records,
                path: RetrievalPath::FullText,
            });
        }
        diagnostics.push(SearchDiagnostic::FullTextEmpty);

        if !self.trigram_fallback {
            debug!("Trigram fallback disabled, skipping");
            diagnostics.push(SearchDiagnostic::TrigramDisabled);
            return Ok(Retrieval::empty());
        }

        if !self.index.capabilities().trigram {
            debug!("Index provider has no trigram search, skipping");
            diagnostics.push(SearchDiagnostic::TrigramUnsupported);
            return Ok(Retrieval::empty());
        }

        let trigram_start = Instant::now();
        match self.index.trigram_search(text, category, max_rows).await {
            Ok(mut records) if !records.is_empty() => {
                debug!(
                    retrieval_path = "trigram",
                    candidate_count = records.len(),
                    duration_ms = trigram_start.elapsed().as_millis() as u64,
                    "Trigram retrieval complete"
                );
                records.truncate(max_rows);
                Ok(Retrieval {
                    records,
                    path: RetrievalPath::Trigram,
                })
            }
            Ok(_) => {
                debug!(retrieval_path = "trigram", "Trigram search returned no rows");
                diagnostics.push(SearchDiagnostic::TrigramEmpty);
                Ok(Retrieval::empty())
            }
            Err(Error::UnsupportedCapability(msg)) => {
                warn!(error = %msg, "Trigram search unsupported, treating as empty");
                diagnostics.push(SearchDiagnostic::TrigramUnsupported);
                Ok(Retrieval::empty())
            }
            Err(e) => {
                warn!(error = %e, "Trigram search failed, treating as empty");
                diagnostics.push(SearchDiagnostic::TrigramFailed {
                    error: e.to_string(),
                });
                Ok(Retrieval::empty())
            }
        }
    }
}
