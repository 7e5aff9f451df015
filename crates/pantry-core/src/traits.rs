//! Provider contracts consumed by the search core.
//!
//! These traits define the interfaces that concrete providers must satisfy,
//! enabling pluggable backends (PostgreSQL, USDA, in-memory mocks) and
//! testability of the fallback state machine.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ExternalFoodRecord, FoodCategory, FoodRecord};

/// Optional capabilities an index provider may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCapabilities {
    /// Fuzzy trigram similarity search is available.
    pub trigram: bool,
}

impl Default for IndexCapabilities {
    fn default() -> Self {
        Self { trigram: true }
    }
}

impl IndexCapabilities {
    /// Capabilities of a provider offering full-text search only.
    pub fn full_text_only() -> Self {
        Self { trigram: false }
    }
}

/// Indexed corpus of food records with text and similarity search.
#[async_trait]
pub trait IndexProvider: Send + Sync {
    /// Capabilities of this provider. Callers must not issue a trigram search
    /// when `trigram` is false.
    fn capabilities(&self) -> IndexCapabilities {
        IndexCapabilities::default()
    }

    /// Full-text search with "all terms required" semantics over the whole
    /// query phrase. The category, when given, is applied as an equality
    /// predicate inside the query.
    async fn full_text_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>>;

    /// Similarity-ranked fuzzy search used when full-text search finds nothing.
    ///
    /// Providers without the capability return `Error::UnsupportedCapability`.
    async fn trigram_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>>;

    /// Cheap corpus-size probe: true when the index holds more than the
    /// populated threshold of records.
    async fn is_populated(&self) -> Result<bool>;
}

/// Remote nutrition lookup used when the index yields nothing.
#[async_trait]
pub trait LiveProvider: Send + Sync {
    /// Short provider name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Look up foods matching `query`, in the provider's own relevance order.
    async fn remote_search(&self, query: &str, max_rows: usize)
        -> Result<Vec<ExternalFoodRecord>>;
}
