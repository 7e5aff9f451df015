//! Test helpers for food search tests.
//!
//! Provides mock index and live providers that record every call, plus
//! fixture builders for food records.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pantry_core::{
    DataType, Error, ExternalFoodRecord, ExternalMacros, FoodCategory, FoodRecord,
    IndexCapabilities, IndexProvider, LiveProvider, Result,
};

/// Canned reply of a mocked provider operation.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Rows(Vec<T>),
    /// Fail with `Error::Retrieval`.
    Fail(String),
    /// Fail with `Error::UnsupportedCapability`.
    Unsupported,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<Vec<T>> {
        match self {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Fail(msg) => Err(Error::Retrieval(msg.clone())),
            Reply::Unsupported => Err(Error::UnsupportedCapability("trigram".to_string())),
        }
    }
}

/// A call received by [`MockIndexProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum IndexCall {
    IsPopulated,
    FullText {
        query: String,
        category: Option<FoodCategory>,
        max_rows: usize,
    },
    Trigram {
        query: String,
        category: Option<FoodCategory>,
        max_rows: usize,
    },
}

#[derive(Debug, Clone)]
struct MockIndexConfig {
    populated: std::result::Result<bool, String>,
    capabilities: IndexCapabilities,
    full_text: Reply<FoodRecord>,
    trigram: Reply<FoodRecord>,
}

/// Mock index provider.
///
/// Category filtering and the row cap are applied the way a real provider
/// applies them inside the query.
#[derive(Clone)]
pub struct MockIndexProvider {
    config: Arc<MockIndexConfig>,
    call_log: Arc<Mutex<Vec<IndexCall>>>,
}

impl MockIndexProvider {
    /// Populated index whose searches return nothing.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockIndexConfig {
                populated: Ok(true),
                capabilities: IndexCapabilities::default(),
                full_text: Reply::Rows(Vec::new()),
                trigram: Reply::Rows(Vec::new()),
            }),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn unpopulated() -> Self {
        Self::new().with_populated(false)
    }

    pub fn with_populated(mut self, populated: bool) -> Self {
        Arc::make_mut(&mut self.config).populated = Ok(populated);
        self
    }

    pub fn with_probe_failure(mut self, msg: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).populated = Err(msg.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: IndexCapabilities) -> Self {
        Arc::make_mut(&mut self.config).capabilities = capabilities;
        self
    }

    pub fn with_full_text(mut self, reply: Reply<FoodRecord>) -> Self {
        Arc::make_mut(&mut self.config).full_text = reply;
        self
    }

    pub fn with_full_text_rows(self, rows: Vec<FoodRecord>) -> Self {
        self.with_full_text(Reply::Rows(rows))
    }

    pub fn with_trigram(mut self, reply: Reply<FoodRecord>) -> Self {
        Arc::make_mut(&mut self.config).trigram = reply;
        self
    }

    pub fn with_trigram_rows(self, rows: Vec<FoodRecord>) -> Self {
        self.with_trigram(Reply::Rows(rows))
    }

    pub fn calls(&self) -> Vec<IndexCall> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn full_text_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, IndexCall::FullText { .. }))
            .count()
    }

    pub fn trigram_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, IndexCall::Trigram { .. }))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    fn record(&self, call: IndexCall) {
        self.call_log.lock().unwrap().push(call);
    }
}

fn apply_query_predicates(
    rows: Vec<FoodRecord>,
    category: Option<FoodCategory>,
    max_rows: usize,
) -> Vec<FoodRecord> {
    rows.into_iter()
        .filter(|r| category.map_or(true, |c| r.effective_category() == c))
        .take(max_rows)
        .collect()
}

#[async_trait]
impl IndexProvider for MockIndexProvider {
    fn capabilities(&self) -> IndexCapabilities {
        self.config.capabilities
    }

    async fn full_text_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>> {
        self.record(IndexCall::FullText {
            query: query.to_string(),
            category,
            max_rows,
        });
        let rows = self.config.full_text.produce()?;
        Ok(apply_query_predicates(rows, category, max_rows))
    }

    async fn trigram_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>> {
        self.record(IndexCall::Trigram {
            query: query.to_string(),
            category,
            max_rows,
        });
        let rows = self.config.trigram.produce()?;
        Ok(apply_query_predicates(rows, category, max_rows))
    }

    async fn is_populated(&self) -> Result<bool> {
        self.record(IndexCall::IsPopulated);
        self.config
            .populated
            .clone()
            .map_err(Error::Retrieval)
    }
}

/// A call received by [`MockLiveProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCall {
    pub query: String,
    pub max_rows: usize,
}

/// Mock live provider returning canned external records.
#[derive(Clone)]
pub struct MockLiveProvider {
    reply: Arc<Reply<ExternalFoodRecord>>,
    call_log: Arc<Mutex<Vec<LiveCall>>>,
}

impl MockLiveProvider {
    pub fn new(rows: Vec<ExternalFoodRecord>) -> Self {
        Self::with_reply(Reply::Rows(rows))
    }

    pub fn failing(msg: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(msg.into()))
    }

    pub fn with_reply(reply: Reply<ExternalFoodRecord>) -> Self {
        Self {
            reply: Arc::new(reply),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<LiveCall> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl LiveProvider for MockLiveProvider {
    fn name(&self) -> &str {
        "mock-live"
    }

    async fn remote_search(&self, query: &str, max_rows: usize) -> Result<Vec<ExternalFoodRecord>> {
        self.call_log.lock().unwrap().push(LiveCall {
            query: query.to_string(),
            max_rows,
        });
        let rows = self.reply.produce()?;
        Ok(rows.into_iter().take(max_rows).collect())
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn food(id: i64, name: &str) -> FoodRecord {
    FoodRecord::new(id, name)
}

/// Canonical Foundation record.
pub fn foundation(id: i64, name: &str) -> FoodRecord {
    FoodRecord::new(id, name)
        .with_data_type(DataType::Foundation)
        .with_canonical(true)
}

/// External record with the given macros per 100 g.
pub fn external(
    id: i64,
    description: &str,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> ExternalFoodRecord {
    ExternalFoodRecord {
        external_id: id,
        description: description.to_string(),
        data_type: Some("SR Legacy".to_string()),
        brand_owner: None,
        serving_size: Some(100.0),
        serving_unit: Some("g".to_string()),
        macros: ExternalMacros {
            calories: Some(protein * 4.0 + carbs * 4.0 + fat * 9.0),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
        },
    }
}

pub fn names(hits: &[pantry_core::FoodSearchHit]) -> Vec<String> {
    hits.iter().map(|h| h.record.name.clone()).collect()
}
