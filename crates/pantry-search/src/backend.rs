//! Search backends, one per provider tier.
//!
//! The orchestrator picks a backend from an explicit state check; the
//! backends themselves do not probe or fall back across tiers.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, trace};

use pantry_core::{
    normalize_external, FoodCategory, FoodSearchHit, IndexProvider, LiveProvider, Result,
    ScoredCandidate, SearchTier,
};

use crate::config::SearchConfig;
use crate::diagnostics::SearchDiagnostic;
use crate::normalizer::NormalizedQuery;
use crate::ranker::rank;
use crate::retriever::CandidateRetriever;
use crate::scoring::RelevanceScorer;

/// A tier able to answer a normalized query.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Tier reported on the hits this backend produces.
    fn tier(&self) -> SearchTier;

    /// Answer a query with at most `limit` hits.
    ///
    /// Errors are provider failures; the orchestrator decides what to do with
    /// them. Non-fatal decisions are appended to `diagnostics`.
    async fn search(
        &self,
        query: &NormalizedQuery,
        category: Option<FoodCategory>,
        limit: usize,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Result<Vec<FoodSearchHit>>;
}

// =============================================================================
// INDEXED
// =============================================================================

/// Retrieval, scoring and ranking over the local index.
#[derive(Clone)]
pub struct IndexedSearchBackend {
    retriever: CandidateRetriever,
    scorer: RelevanceScorer,
    config: SearchConfig,
}

impl IndexedSearchBackend {
    pub fn new(index: Arc<dyn IndexProvider>, config: SearchConfig) -> Self {
        let retriever =
            CandidateRetriever::new(index).with_trigram_fallback(config.flags.trigram_fallback);
        let scorer = RelevanceScorer::new(config.weights.clone());
        Self {
            retriever,
            scorer,
            config,
        }
    }

    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }
}

#[async_trait]
impl SearchBackend for IndexedSearchBackend {
    fn tier(&self) -> SearchTier {
        SearchTier::Indexed
    }

    async fn search(
        &self,
        query: &NormalizedQuery,
        category: Option<FoodCategory>,
        limit: usize,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Result<Vec<FoodSearchHit>> {
        let over_fetch = self.config.over_fetch_limit(limit);
        let retrieval = self
            .retriever
            .retrieve(query, category, over_fetch, diagnostics)
            .await?;

        let candidate_count = retrieval.records.len();
        let scored: Vec<ScoredCandidate> = retrieval
            .records
            .into_iter()
            .map(|record| {
                let raw_score = self.scorer.score(&record, query);
                trace!(
                    food_id = record.id,
                    name = %record.name,
                    score = raw_score,
                    "Scored candidate"
                );
                ScoredCandidate::new(record, raw_score)
            })
            .collect();

        let hits: Vec<FoodSearchHit> = rank(scored, limit)
            .into_iter()
            .map(FoodSearchHit::from)
            .collect();

        debug!(
            tier = "indexed",
            retrieval_path = retrieval.path.as_str(),
            over_fetch,
            candidate_count,
            result_count = hits.len(),
            "Indexed search ranked"
        );
        Ok(hits)
    }
}

// =============================================================================
// LIVE
// =============================================================================

/// Remote lookup whose results are normalized but not re-scored.
#[derive(Clone)]
pub struct LiveSearchBackend {
    provider: Arc<dyn LiveProvider>,
    config: SearchConfig,
}

impl LiveSearchBackend {
    pub fn new(provider: Arc<dyn LiveProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[async_trait]
impl SearchBackend for LiveSearchBackend {
    fn tier(&self) -> SearchTier {
        SearchTier::Live
    }

    async fn search(
        &self,
        query: &NormalizedQuery,
        category: Option<FoodCategory>,
        limit: usize,
        diagnostics: &mut Vec<SearchDiagnostic>,
    ) -> Result<Vec<FoodSearchHit>> {
        // The provider has no category filter, so over-fetch to leave
        // enough rows after filtering.
        let filter_category = category.filter(|_| self.config.flags.live_category_filter);
        let max_rows = match filter_category {
            Some(_) => self.config.over_fetch_limit(limit),
            None => limit,
        };

        let start = Instant::now();
        let external = self.provider.remote_search(&query.text, max_rows).await?;
        let received = external.len();

        let mut records: Vec<_> = external.into_iter().map(normalize_external).collect();

        if let Some(wanted) = filter_category {
            records.retain(|r| FoodCategory::from_macros(r.protein, r.carbs, r.fat) == wanted);
            let removed = received - records.len();
            if removed > 0 {
                debug!(
                    category = %wanted,
                    removed,
                    "Category post-filter dropped live results"
                );
                diagnostics.push(SearchDiagnostic::CategoryFiltered { removed });
            }
        }

        records.truncate(limit);
        debug!(
            tier = "live",
            provider = self.provider.name(),
            candidate_count = received,
            result_count = records.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Live search complete"
        );

        Ok(records.into_iter().map(FoodSearchHit::unscored).collect())
    }
}
