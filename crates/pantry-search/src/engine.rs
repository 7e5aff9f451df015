//! Fallback orchestrator: the entry point of food search.
//!
//! State machine over two tiers:
//!
//! - populated index: retrieve, score and rank; return when non-empty
//! - otherwise, or when the index path comes back empty: ask the live provider
//!
//! Provider errors are swallowed at the tier that raised them and recorded as
//! diagnostics. A failed search is an empty result, never an error.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, instrument, warn, Span};
use uuid::Uuid;

use pantry_core::{
    logging, Error, FoodCategory, FoodSearchHit, IndexProvider, LiveProvider, SearchTier,
};

use crate::backend::{IndexedSearchBackend, LiveSearchBackend, SearchBackend};
use crate::config::SearchConfig;
use crate::diagnostics::{SearchDiagnostic, SearchOutcome};
use crate::normalizer::NormalizedQuery;

/// Which backend the population probe selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    /// Index holds enough records; search it first.
    Populated,
    /// Index is empty, too small, or could not be probed; go straight to live.
    Unpopulated,
}

/// Food search over an index provider with an optional live fallback.
#[derive(Clone)]
pub struct FoodSearchEngine {
    index: Arc<dyn IndexProvider>,
    indexed: IndexedSearchBackend,
    live: Option<LiveSearchBackend>,
    config: SearchConfig,
}

impl FoodSearchEngine {
    /// Engine over an index provider with default configuration and no live
    /// provider.
    pub fn new(index: Arc<dyn IndexProvider>) -> Self {
        Self::with_config(index, SearchConfig::default())
    }

    pub fn with_config(index: Arc<dyn IndexProvider>, config: SearchConfig) -> Self {
        Self {
            indexed: IndexedSearchBackend::new(index.clone(), config.clone()),
            index,
            live: None,
            config,
        }
    }

    /// Attach the live provider used when the index yields nothing.
    pub fn with_live_provider(mut self, provider: Arc<dyn LiveProvider>) -> Self {
        self.live = Some(LiveSearchBackend::new(provider, self.config.clone()));
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Ordered hits for `query`. Never fails; see [`Self::search_with_diagnostics`].
    pub async fn search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        limit: usize,
    ) -> Vec<FoodSearchHit> {
        self.search_with_diagnostics(query, category, limit)
            .await
            .hits
    }

    /// Ordered hits plus the tier that produced them and every decision taken.
    ///
    /// `limit` must be positive; a zero limit yields an empty result without
    /// calling any provider.
    #[instrument(skip(self), fields(
        subsystem = "search",
        component = "orchestrator",
        op = "search",
        request_id = tracing::field::Empty,
    ))]
    pub async fn search_with_diagnostics(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        limit: usize,
    ) -> SearchOutcome {
        Span::current().record(logging::REQUEST_ID, tracing::field::display(Uuid::now_v7()));
        let start = Instant::now();
        let mut diagnostics = Vec::new();

        let normalized = NormalizedQuery::new(query);
        if !normalized.is_searchable(self.config.min_query_len) {
            debug!(
                len = normalized.char_len(),
                min = self.config.min_query_len,
                "Query too short, skipping providers"
            );
            diagnostics.push(SearchDiagnostic::QueryTooShort {
                len: normalized.char_len(),
                min: self.config.min_query_len,
            });
            return SearchOutcome::empty(diagnostics);
        }
        if limit == 0 {
            debug!("Zero limit requested, skipping providers");
            diagnostics.push(SearchDiagnostic::ZeroLimit);
            return SearchOutcome::empty(diagnostics);
        }

        let state = self.backend_state(&mut diagnostics).await;
        debug!(?state, "Selected backend");

        if state == BackendState::Populated {
            match self
                .indexed
                .search(&normalized, category, limit, &mut diagnostics)
                .await
            {
                Ok(hits) if !hits.is_empty() => {
                    return self.finish(hits, SearchTier::Indexed, diagnostics, start);
                }
                Ok(_) => debug!("Indexed search empty, falling back"),
                Err(e) => {
                    log_swallowed("indexed", &e);
                    diagnostics.push(SearchDiagnostic::FullTextFailed {
                        error: e.to_string(),
                    });
                }
            }
        }

        let live = match &self.live {
            Some(live) if self.config.flags.live_fallback => live,
            _ => {
                debug!("No live fallback available");
                diagnostics.push(SearchDiagnostic::LiveUnavailable);
                return self.finish(Vec::new(), SearchTier::Live, diagnostics, start);
            }
        };

        match live
            .search(&normalized, category, limit, &mut diagnostics)
            .await
        {
            Ok(hits) => self.finish(hits, SearchTier::Live, diagnostics, start),
            Err(e) => {
                log_swallowed(live.provider_name(), &e);
                diagnostics.push(SearchDiagnostic::LiveFailed {
                    provider: live.provider_name().to_string(),
                    error: e.to_string(),
                });
                self.finish(Vec::new(), SearchTier::Live, diagnostics, start)
            }
        }
    }

    /// Probe the index. A failed probe counts as unpopulated.
    async fn backend_state(&self, diagnostics: &mut Vec<SearchDiagnostic>) -> BackendState {
        match self.index.is_populated().await {
            Ok(true) => BackendState::Populated,
            Ok(false) => {
                diagnostics.push(SearchDiagnostic::IndexUnpopulated);
                BackendState::Unpopulated
            }
            Err(e) => {
                warn!(error = %e, "Population probe failed, skipping index");
                diagnostics.push(SearchDiagnostic::ProbeFailed {
                    error: e.to_string(),
                });
                BackendState::Unpopulated
            }
        }
    }

    fn finish(
        &self,
        hits: Vec<FoodSearchHit>,
        tier: SearchTier,
        diagnostics: Vec<SearchDiagnostic>,
        start: Instant,
    ) -> SearchOutcome {
        let tier = (!hits.is_empty()).then_some(tier);
        info!(
            tier = tier.map(|t| t.as_str()).unwrap_or("none"),
            result_count = hits.len(),
            diagnostic_count = diagnostics.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Food search completed"
        );
        SearchOutcome {
            hits,
            tier,
            diagnostics,
        }
    }
}

/// Expected provider failures (transport, database, unsupported capability)
/// are warnings; anything else points at a misconfiguration or a bug.
fn log_swallowed(tier: &str, e: &Error) {
    if e.is_fallback_trigger() {
        warn!(tier, error = %e, "Search tier failed, treating as empty");
    } else {
        error!(tier, error = %e, "Search tier failed unexpectedly, treating as empty");
    }
}

/// Builder for food search requests.
///
/// # Example
/// ```ignore
/// let hits = SearchRequest::new("white rice")
///     .with_category(FoodCategory::Carbs)
///     .with_limit(10)
///     .execute(&engine)
///     .await;
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    query: String,
    category: Option<FoodCategory>,
    limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: None,
            limit: None,
        }
    }

    /// Restrict results to one category.
    pub fn with_category(mut self, category: FoodCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the result limit. Defaults to the engine's configured limit.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub async fn execute(self, engine: &FoodSearchEngine) -> Vec<FoodSearchHit> {
        self.execute_with_diagnostics(engine).await.hits
    }

    pub async fn execute_with_diagnostics(self, engine: &FoodSearchEngine) -> SearchOutcome {
        let limit = self.limit.unwrap_or(engine.config().default_limit);
        engine
            .search_with_diagnostics(&self.query, self.category, limit)
            .await
    }
}
