//! # pantry-search
//!
//! Food relevance search for pantry.
//!
//! A query is normalized, candidates are retrieved from the index provider
//! (full-text, then trigram similarity), scored by a fixed set of additive
//! relevance signals and ranked. When the index is unpopulated or yields
//! nothing, the query is delegated to a live provider whose results are
//! normalized and returned in provider order.
//!
//! ```ignore
//! use pantry_search::{FoodSearchEngine, SearchConfig};
//!
//! let engine = FoodSearchEngine::with_config(index, SearchConfig::from_env())
//!     .with_live_provider(usda);
//! let hits = engine.search("ground chicken", None, 25).await;
//! ```

pub mod backend;
pub mod compound;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod incompatibility;
pub mod normalizer;
pub mod ranker;
pub mod retriever;
pub mod scoring;

pub use backend::{IndexedSearchBackend, LiveSearchBackend, SearchBackend};
pub use compound::{CompoundDishDetector, CompoundTier};
pub use config::{SearchConfig, SearchFeatureFlags};
pub use diagnostics::{SearchDiagnostic, SearchOutcome};
pub use engine::{BackendState, FoodSearchEngine, SearchRequest};
pub use incompatibility::{Conflict, IncompatibilityFilter};
pub use normalizer::NormalizedQuery;
pub use ranker::rank;
pub use retriever::{CandidateRetriever, Retrieval, RetrievalPath};
pub use scoring::{RelevanceScorer, ScoreBreakdown, ScoringWeights};

// Re-export core types used in this crate's public API
pub use pantry_core::{
    Error, FoodCategory, FoodRecord, FoodSearchHit, IndexProvider, LiveProvider, Result,
    ScoredCandidate, SearchTier,
};
