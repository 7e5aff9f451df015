//! Integration tests for the PostgreSQL food index.
//!
//! Require a PostgreSQL instance with `pg_trgm` available; see
//! `pantry_db::test_fixtures` for configuration.

use std::sync::Arc;
use std::time::Duration;

use pantry_core::{DataType, FoodCategory, FoodRecord, IndexProvider, SearchTier};
use pantry_db::test_fixtures::TestDatabase;
use pantry_db::IndexConfig;
use pantry_search::FoodSearchEngine;

fn corpus() -> Vec<FoodRecord> {
    vec![
        FoodRecord::new(1, "White Rice, cooked")
            .with_category(FoodCategory::Carbs)
            .with_macros(130.0, 2.7, 28.2, 0.3)
            .with_data_type(DataType::Foundation)
            .with_canonical(true)
            .with_preparation_method("cooked"),
        FoodRecord::new(2, "Rice Pilaf with Vegetables")
            .with_category(FoodCategory::Carbs)
            .with_macros(150.0, 3.0, 26.0, 3.5)
            .with_data_type(DataType::SrLegacy),
        FoodRecord::new(3, "Chicken Breast, raw")
            .with_category(FoodCategory::Protein)
            .with_macros(120.0, 22.5, 0.0, 2.6)
            .with_data_type(DataType::Foundation)
            .with_canonical(true),
        // No stored category: inferred as carbs from macros
        FoodRecord::new(4, "Brown Rice, cooked")
            .with_macros(123.0, 2.7, 25.6, 1.0)
            .with_data_type(DataType::SrLegacy),
        FoodRecord::new(5, "Olive Oil")
            .with_category(FoodCategory::Fats)
            .with_macros(884.0, 0.0, 0.0, 100.0)
            .with_data_type(DataType::Foundation)
            .with_search_terms(["extra virgin"]),
    ]
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_capabilities_detected_after_schema_install() {
    let test_db = TestDatabase::new().await.unwrap();
    assert!(test_db.index.capabilities().trigram);
    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_full_text_requires_all_terms() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();

    let hits = test_db
        .index
        .full_text_search("white rice", None, 10)
        .await
        .unwrap();
    let ids: Vec<i64> = hits.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1]);

    let none = test_db
        .index
        .full_text_search("white quinoa", None, 10)
        .await
        .unwrap();
    assert!(none.is_empty());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_full_text_round_trips_record_fields() {
    let test_db = TestDatabase::new().await.unwrap();
    let foods = corpus();
    test_db.insert_foods(&foods).await.unwrap();

    let hits = test_db
        .index
        .full_text_search("olive oil", None, 10)
        .await
        .unwrap();
    assert_eq!(hits, vec![foods[4].clone()]);

    // Auxiliary search terms are indexed too
    let by_term = test_db
        .index
        .full_text_search("virgin", None, 10)
        .await
        .unwrap();
    assert_eq!(by_term.len(), 1);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_category_predicate_uses_inferred_category() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();

    let carbs = test_db
        .index
        .full_text_search("rice", Some(FoodCategory::Carbs), 10)
        .await
        .unwrap();
    let mut ids: Vec<i64> = carbs.iter().map(|f| f.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 4]);

    let protein = test_db
        .index
        .full_text_search("rice", Some(FoodCategory::Protein), 10)
        .await
        .unwrap();
    assert!(protein.is_empty());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_max_rows_is_respected() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();

    let hits = test_db
        .index
        .full_text_search("rice", None, 2)
        .await
        .unwrap();
    assert_eq!(hits.len(), 2);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_trigram_tolerates_misspelling() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();

    let fts = test_db
        .index
        .full_text_search("chiken brest raw", None, 10)
        .await
        .unwrap();
    assert!(fts.is_empty());

    let hits = test_db
        .index
        .trigram_search("chiken brest raw", None, 10)
        .await
        .unwrap();
    assert_eq!(hits.first().map(|f| f.id), Some(3));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_population_probe_threshold() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();
    assert!(!test_db.index.is_populated().await.unwrap());

    // 5 + 95 = 100 rows: not more than the threshold
    test_db.insert_filler(1000, 95).await.unwrap();
    assert!(!test_db.index.is_populated().await.unwrap());

    test_db.insert_filler(2000, 1).await.unwrap();
    assert!(test_db.index.is_populated().await.unwrap());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_population_probe_is_cached() {
    let config = IndexConfig::default().with_probe_cache_ttl(Duration::from_secs(60));
    let test_db = TestDatabase::with_config(config).await.unwrap();
    assert!(!test_db.index.is_populated().await.unwrap());

    test_db.insert_filler(1, 200).await.unwrap();
    assert!(!test_db.index.is_populated().await.unwrap(), "stale answer expected");

    test_db.index.invalidate_probe_cache().await;
    assert!(test_db.index.is_populated().await.unwrap());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_engine_over_postgres_ranks_white_rice_first() {
    let test_db = TestDatabase::new().await.unwrap();
    test_db.insert_foods(&corpus()).await.unwrap();
    test_db.insert_filler(1000, 150).await.unwrap();

    let engine = FoodSearchEngine::new(Arc::new(test_db.index.clone()));
    let outcome = engine
        .search_with_diagnostics("white rice", Some(FoodCategory::Carbs), 10)
        .await;

    assert_eq!(outcome.tier, Some(SearchTier::Indexed));
    assert_eq!(outcome.hits[0].record.name, "White Rice, cooked");

    test_db.cleanup().await;
}
