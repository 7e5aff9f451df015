//! PostgreSQL food index.
//!
//! - Full-text search uses `websearch_to_tsquery()` over a generated tsvector
//!   (name weighted A, auxiliary search terms weighted B), so every term of
//!   the phrase must match.
//! - Trigram search calls the `search_foods_trigram(query, category, max_rows)`
//!   function installed by the migrations (requires `pg_trgm`).
//! - The population probe counts at most `threshold + 1` rows and its answer
//!   is cached for `probe_cache_ttl`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use pantry_core::{
    DataType, Error, FoodCategory, FoodRecord, IndexCapabilities, IndexProvider, Result,
};

use crate::config::IndexConfig;
use crate::pool::PoolHealth;

/// Full-text query: all terms required, category applied as an equality
/// predicate on the effective (stored or macro-inferred) category.
/// $1 = query text, $2 = category or NULL, $3 = max rows.
pub const FULL_TEXT_SQL: &str = r#"
    SELECT id, name, normalized_name, category, calories, protein, carbs, fat,
           serving_size, serving_unit, data_type, is_canonical, preparation_method, search_terms
    FROM food
    WHERE tsv @@ websearch_to_tsquery('english', $1)
      AND ($2::text IS NULL OR effective_category = $2::text)
    ORDER BY ts_rank(tsv, websearch_to_tsquery('english', $1)) DESC, id
    LIMIT $3
"#;

/// $1 = query text, $2 = category or NULL, $3 = max rows.
pub const TRIGRAM_SQL: &str = r#"
    SELECT id, name, normalized_name, category, calories, protein, carbs, fat,
           serving_size, serving_unit, data_type, is_canonical, preparation_method, search_terms
    FROM search_foods_trigram($1, $2::text, $3::integer)
"#;

/// Counts at most $1 rows so the probe stays cheap on a large corpus.
pub const POPULATION_PROBE_SQL: &str =
    "SELECT COUNT(*) AS row_count FROM (SELECT 1 FROM food LIMIT $1) AS probe";

/// PostgreSQL `undefined_function`.
const UNDEFINED_FUNCTION: &str = "42883";

#[derive(Debug, Clone, Copy)]
struct CachedProbe {
    populated: bool,
    checked_at: Instant,
}

/// Index provider over the `food` table.
#[derive(Clone)]
pub struct PgFoodIndex {
    pool: Pool<Postgres>,
    config: IndexConfig,
    capabilities: IndexCapabilities,
    probe_cache: Arc<RwLock<Option<CachedProbe>>>,
}

impl PgFoodIndex {
    /// Index assuming trigram support, with default configuration.
    ///
    /// Use [`PgFoodIndex::connect`] to detect capabilities instead.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_config(pool, IndexConfig::default())
    }

    pub fn with_config(pool: Pool<Postgres>, config: IndexConfig) -> Self {
        Self {
            pool,
            config,
            capabilities: IndexCapabilities::default(),
            probe_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Override the advertised capabilities.
    pub fn with_capabilities(mut self, capabilities: IndexCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Index with capabilities detected from the database.
    pub async fn connect(pool: Pool<Postgres>, config: IndexConfig) -> Result<Self> {
        let capabilities = detect_capabilities(&pool).await?;
        info!(
            subsystem = "database",
            component = "food_index",
            op = "connect",
            trigram = capabilities.trigram,
            populated_threshold = config.populated_threshold,
            probe_cache_ttl_secs = config.probe_cache_ttl.as_secs(),
            "Food index ready"
        );
        Ok(Self::with_config(pool, config).with_capabilities(capabilities))
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn pool_health(&self) -> PoolHealth {
        PoolHealth::of(&self.pool)
    }

    /// Pool timeouts usually mean exhaustion; log occupancy alongside them.
    fn note_query_error(&self, err: &sqlx::Error) {
        if matches!(err, sqlx::Error::PoolTimedOut) {
            self.pool_health().log();
        }
    }

    /// Drop the cached probe answer, e.g. after bulk-loading the corpus.
    pub async fn invalidate_probe_cache(&self) {
        *self.probe_cache.write().await = None;
    }

    async fn cached_probe(&self) -> Option<bool> {
        if self.config.probe_cache_ttl == Duration::ZERO {
            return None;
        }
        let cache = self.probe_cache.read().await;
        (*cache)
            .filter(|c| c.checked_at.elapsed() < self.config.probe_cache_ttl)
            .map(|c| c.populated)
    }

    async fn count_up_to(&self, limit: i64) -> Result<i64> {
        let row = sqlx::query(POPULATION_PROBE_SQL)
            .bind(limit)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                self.note_query_error(&e);
                Error::Database(e)
            })?;
        Ok(row.get::<i64, _>("row_count"))
    }

    async fn fetch_foods(
        &self,
        sql: &str,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> std::result::Result<Vec<FoodRecord>, sqlx::Error> {
        let rows = sqlx::query(sql)
            .bind(query)
            .bind(category.map(|c| c.as_str()))
            .bind(i64::try_from(max_rows).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_food).collect()
    }
}

/// Detect optional capabilities: trigram search needs both the `pg_trgm`
/// extension and the `search_foods_trigram` function.
pub async fn detect_capabilities(pool: &Pool<Postgres>) -> Result<IndexCapabilities> {
    let row = sqlx::query(
        r#"
        SELECT
            EXISTS(SELECT 1 FROM pg_extension WHERE extname = 'pg_trgm') AS has_trgm,
            EXISTS(SELECT 1 FROM pg_proc WHERE proname = 'search_foods_trigram') AS has_function
        "#,
    )
    .fetch_one(pool)
    .await
    .map_err(Error::Database)?;

    let has_trgm: bool = row.get("has_trgm");
    let has_function: bool = row.get("has_function");
    if !has_trgm || !has_function {
        warn!(
            subsystem = "database",
            component = "food_index",
            has_trgm,
            has_function,
            "Trigram search unavailable"
        );
    }

    Ok(IndexCapabilities {
        trigram: has_trgm && has_function,
    })
}

fn row_to_food(row: &PgRow) -> std::result::Result<FoodRecord, sqlx::Error> {
    let category: Option<String> = row.try_get("category")?;
    let data_type: String = row.try_get("data_type")?;
    Ok(FoodRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        normalized_name: row.try_get("normalized_name")?,
        category: category.and_then(|c| c.parse().ok()),
        calories: row.try_get("calories")?,
        protein: row.try_get("protein")?,
        carbs: row.try_get("carbs")?,
        fat: row.try_get("fat")?,
        serving_size: row.try_get("serving_size")?,
        serving_unit: row.try_get("serving_unit")?,
        data_type: DataType::from_label(&data_type),
        is_canonical: row.try_get("is_canonical")?,
        preparation_method: row.try_get("preparation_method")?,
        search_terms: row.try_get("search_terms")?,
    })
}

fn is_undefined_function(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNDEFINED_FUNCTION),
        _ => false,
    }
}

#[async_trait]
impl IndexProvider for PgFoodIndex {
    fn capabilities(&self) -> IndexCapabilities {
        self.capabilities
    }

    #[instrument(
        skip(self),
        fields(subsystem = "database", component = "food_index", op = "full_text_search")
    )]
    async fn full_text_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>> {
        let start = Instant::now();
        let foods = self
            .fetch_foods(FULL_TEXT_SQL, query, category, max_rows)
            .await
            .map_err(|e| {
                self.note_query_error(&e);
                Error::Database(e)
            })?;

        debug!(
            result_count = foods.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Full-text query complete"
        );
        Ok(foods)
    }

    #[instrument(
        skip(self),
        fields(subsystem = "database", component = "food_index", op = "trigram_search")
    )]
    async fn trigram_search(
        &self,
        query: &str,
        category: Option<FoodCategory>,
        max_rows: usize,
    ) -> Result<Vec<FoodRecord>> {
        if !self.capabilities.trigram {
            return Err(Error::UnsupportedCapability(
                "trigram search requires pg_trgm and search_foods_trigram".to_string(),
            ));
        }

        let start = Instant::now();
        let foods = self
            .fetch_foods(TRIGRAM_SQL, query, category, max_rows)
            .await
            .map_err(|e| {
                self.note_query_error(&e);
                if is_undefined_function(&e) {
                    Error::UnsupportedCapability(format!("search_foods_trigram: {e}"))
                } else {
                    Error::Database(e)
                }
            })?;

        debug!(
            result_count = foods.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Trigram query complete"
        );
        Ok(foods)
    }

    async fn is_populated(&self) -> Result<bool> {
        if let Some(populated) = self.cached_probe().await {
            return Ok(populated);
        }

        let threshold = self.config.populated_threshold;
        let count = self.count_up_to(threshold.saturating_add(1)).await?;
        let populated = count > threshold;

        debug!(
            subsystem = "database",
            component = "food_index",
            op = "population_probe",
            row_count = count,
            threshold,
            populated,
            "Population probe complete"
        );

        if self.config.probe_cache_ttl > Duration::ZERO {
            *self.probe_cache.write().await = Some(CachedProbe {
                populated,
                checked_at: Instant::now(),
            });
        }
        Ok(populated)
    }
}
