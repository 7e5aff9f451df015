//! Candidate retriever tests: full-text first, trigram only on empty.

mod helpers;

use std::sync::Arc;

use helpers::*;
use pantry_core::{Error, FoodCategory, IndexCapabilities};
use pantry_search::{
    CandidateRetriever, IndexedSearchBackend, NormalizedQuery, RetrievalPath, SearchBackend,
    SearchConfig, SearchDiagnostic,
};

fn retriever(index: &MockIndexProvider) -> CandidateRetriever {
    CandidateRetriever::new(Arc::new(index.clone()))
}

#[tokio::test]
async fn test_full_text_hit_skips_trigram() {
    let index = MockIndexProvider::new()
        .with_full_text_rows(vec![food(1, "Ground Chicken, raw")])
        .with_trigram_rows(vec![food(2, "Chicken, ground")]);
    let mut diagnostics = Vec::new();

    let retrieval = retriever(&index)
        .retrieve(&NormalizedQuery::new("ground chicken"), None, 30, &mut diagnostics)
        .await
        .unwrap();

    assert_eq!(retrieval.path, RetrievalPath::FullText);
    assert_eq!(retrieval.records.len(), 1);
    assert_eq!(index.trigram_calls(), 0);
    assert!(diagnostics.is_empty());
}

#[tokio::test]
async fn test_empty_full_text_retries_with_trigram_using_same_arguments() {
    let index = MockIndexProvider::new()
        .with_full_text_rows(Vec::new())
        .with_trigram_rows(vec![food(1, "Broccoli, raw").with_category(FoodCategory::Carbs)]);
    let mut diagnostics = Vec::new();

    let retrieval = retriever(&index)
        .retrieve(
            &NormalizedQuery::new("brocoli"),
            Some(FoodCategory::Carbs),
            15,
            &mut diagnostics,
        )
        .await
        .unwrap();

    assert_eq!(retrieval.path, RetrievalPath::Trigram);
    assert_eq!(
        index.calls(),
        vec![
            IndexCall::FullText {
                query: "brocoli".to_string(),
                category: Some(FoodCategory::Carbs),
                max_rows: 15,
            },
            IndexCall::Trigram {
                query: "brocoli".to_string(),
                category: Some(FoodCategory::Carbs),
                max_rows: 15,
            },
        ]
    );
    assert_eq!(diagnostics, vec![SearchDiagnostic::FullTextEmpty]);
}

#[tokio::test]
async fn test_full_text_error_propagates_without_trigram() {
    let index = MockIndexProvider::new().with_full_text(Reply::Fail("syntax error".to_string()));
    let mut diagnostics = Vec::new();

    let result = retriever(&index)
        .retrieve(&NormalizedQuery::new("rice"), None, 30, &mut diagnostics)
        .await;

    assert!(matches!(result, Err(Error::Retrieval(_))));
    assert_eq!(index.trigram_calls(), 0);
}

#[tokio::test]
async fn test_trigram_capability_absent_is_not_called() {
    let index = MockIndexProvider::new()
        .with_capabilities(IndexCapabilities::full_text_only())
        .with_trigram_rows(vec![food(1, "Rice")]);
    let mut diagnostics = Vec::new();

    let retrieval = retriever(&index)
        .retrieve(&NormalizedQuery::new("rice"), None, 30, &mut diagnostics)
        .await
        .unwrap();

    assert_eq!(retrieval.path, RetrievalPath::Empty);
    assert_eq!(index.trigram_calls(), 0);
    assert_eq!(
        diagnostics,
        vec![
            SearchDiagnostic::FullTextEmpty,
            SearchDiagnostic::TrigramUnsupported,
        ]
    );
}

#[tokio::test]
async fn test_trigram_disabled_by_flag() {
    let index = MockIndexProvider::new().with_trigram_rows(vec![food(1, "Rice")]);
    let mut diagnostics = Vec::new();

    let retrieval = retriever(&index)
        .with_trigram_fallback(false)
        .retrieve(&NormalizedQuery::new("rice"), None, 30, &mut diagnostics)
        .await
        .unwrap();

    assert!(retrieval.records.is_empty());
    assert_eq!(index.trigram_calls(), 0);
    assert!(diagnostics.contains(&SearchDiagnostic::TrigramDisabled));
}

#[tokio::test]
async fn test_trigram_error_becomes_empty_result() {
    let index = MockIndexProvider::new().with_trigram(Reply::Fail("timeout".to_string()));
    let mut diagnostics = Vec::new();

    let retrieval = retriever(&index)
        .retrieve(&NormalizedQuery::new("rice"), None, 30, &mut diagnostics)
        .await
        .unwrap();

    assert!(retrieval.records.is_empty());
    assert_eq!(retrieval.path, RetrievalPath::Empty);
    assert!(matches!(
        diagnostics.last(),
        Some(SearchDiagnostic::TrigramFailed { error }) if error.contains("timeout")
    ));
}

#[tokio::test]
async fn test_punctuation_only_query_sends_trimmed_text() {
    let index = MockIndexProvider::new();
    let mut diagnostics = Vec::new();

    retriever(&index)
        .retrieve(&NormalizedQuery::new(" ?! "), None, 30, &mut diagnostics)
        .await
        .unwrap();

    assert!(matches!(
        &index.calls()[0],
        IndexCall::FullText { query, .. } if query == "?!"
    ));
}

#[tokio::test]
async fn test_indexed_backend_over_fetches_and_ranks() {
    let index = MockIndexProvider::new().with_full_text_rows(vec![
        food(1, "Teriyaki Sauce with Chicken"),
        foundation(2, "Chicken Breast, raw"),
        food(3, "Chicken, breast, fried, batter"),
    ]);
    let backend = IndexedSearchBackend::new(Arc::new(index.clone()), SearchConfig::default());
    let mut diagnostics = Vec::new();

    let hits = backend
        .search(&NormalizedQuery::new("chicken breast"), None, 2, &mut diagnostics)
        .await
        .unwrap();

    assert!(index.calls().contains(&IndexCall::FullText {
        query: "chicken breast".to_string(),
        category: None,
        max_rows: 6,
    }));
    assert_eq!(names(&hits), vec!["Chicken Breast, raw", "Chicken, breast, fried, batter"]);
    assert!(hits[0].relevance_score > hits[1].relevance_score);
}
