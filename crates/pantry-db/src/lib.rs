//! # pantry-db
//!
//! PostgreSQL index provider for the pantry food search engine.
//!
//! This crate provides:
//! - Connection pool management
//! - Full-text food search with `websearch_to_tsquery`
//! - Trigram similarity fallback through `search_foods_trigram`
//! - A cached corpus population probe
//! - Schema migrations (behind the `migrations` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use pantry_db::connect_from_env;
//! use pantry_search::FoodSearchEngine;
//!
//! let index = connect_from_env().await?;
//! let engine = FoodSearchEngine::new(Arc::new(index));
//! ```

pub mod config;
pub mod pool;
pub mod search;
pub mod test_fixtures;

pub use config::IndexConfig;
pub use pool::{
    create_pool, create_pool_with_config, create_schema_scoped_pool, PoolConfig, PoolHealth,
};
pub use search::{detect_capabilities, PgFoodIndex};

use pantry_core::{Error, Result};

/// The food index schema, as applied by the migrations.
pub const SCHEMA_SQL: &str = include_str!("../migrations/20260901000000_food_index.sql");

/// Connect to `DATABASE_URL` (a `.env` file is honoured) and build a food
/// index with capabilities detected and [`IndexConfig::from_env`] settings.
pub async fn connect_from_env() -> Result<PgFoodIndex> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| Error::Config("DATABASE_URL is not set".to_string()))?;
    let pool = create_pool(&url).await?;
    let index = PgFoodIndex::connect(pool, IndexConfig::from_env()).await?;
    index.pool_health().log();
    Ok(index)
}

/// Run pending migrations.
#[cfg(feature = "migrations")]
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
    Ok(())
}
