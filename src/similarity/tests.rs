use std::sync::Arc;

use super::*;
use crate::provider::{MockScoringProvider, UsageLedger, vector_with_similarity};

fn ideal(values: Vec<f32>) -> SimilarityVector {
    SimilarityVector::new("ideal", values)
}

#[test]
fn test_cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}

#[test]
fn test_best_similarity_takes_unrounded_max() {
    let ideals = vec![
        ideal(vec![0.0, 1.0]),
        ideal(vec![1.0, 0.0]),
    ];
    let candidate = vector_with_similarity(0.8123);
    assert!((best_similarity(&candidate, &ideals) - 0.8123).abs() < 1e-5);

    let near_borderline = vector_with_similarity(0.5996);
    assert!(best_similarity(&near_borderline, &ideals) < 0.6);
}

#[test]
fn test_best_similarity_edge_cases() {
    assert_eq!(best_similarity(&[1.0, 0.0], &[]), 0.0);
    assert_eq!(best_similarity(&[-1.0, 0.0], &[ideal(vec![1.0, 0.0])]), 0.0);
    assert_eq!(best_similarity(&[1.0, 0.0, 0.0], &[ideal(vec![1.0, 0.0])]), 0.0);
}

#[test]
fn test_vector_provenance() {
    let v = SimilarityVector::new("Senior Rust engineer", vec![1.0]);
    assert!(v.is_from("Senior Rust engineer"));
    assert!(!v.is_from("Junior Rust engineer"));
    assert_eq!(v.dim(), 1);
}

fn engine(provider: Arc<MockScoringProvider>) -> SimilarityEngine {
    SimilarityEngine::new(provider, Arc::new(UsageLedger::new()), 100)
}

#[tokio::test]
async fn test_ideals_recomputed_only_on_change() {
    let provider = Arc::new(MockScoringProvider::new());
    let mut engine = engine(provider.clone());
    let ideals = vec!["Ideal A".to_string(), "Ideal B".to_string()];

    assert!(engine.prepare_ideals(&ideals).await.unwrap());
    assert_eq!(provider.embed_calls(), 2);

    assert!(!engine.prepare_ideals(&ideals).await.unwrap());
    assert_eq!(provider.embed_calls(), 2);

    let changed = vec!["Ideal A".to_string()];
    assert!(engine.prepare_ideals(&changed).await.unwrap());
    assert_eq!(provider.embed_calls(), 3);
    assert_eq!(engine.ideals().len(), 1);
}

#[tokio::test]
async fn test_ideal_failure_clears_set() {
    let provider = Arc::new(MockScoringProvider::new().failing_embed_for("bad ideal"));
    let mut engine = engine(provider);

    engine.prepare_ideals(&["good".to_string()]).await.unwrap();
    let result = engine
        .prepare_ideals(&["good".to_string(), "bad ideal".to_string()])
        .await;
    assert!(result.is_err());
    assert!(engine.ideals().is_empty());
}

#[tokio::test]
async fn test_candidate_embeddings_are_cached() {
    let provider = Arc::new(MockScoringProvider::new().with_similarity("candidate", 0.9));
    let mut engine = engine(provider.clone());
    engine.prepare_ideals(&["ideal".to_string()]).await.unwrap();

    let first = engine.similarity("candidate").await.unwrap();
    let second = engine.similarity("candidate").await.unwrap();

    assert!((first - 0.9).abs() < 1e-5);
    assert_eq!(first, second);
    assert_eq!(provider.embed_calls(), 2);
    assert_eq!(engine.cached_embeddings(), 1);
    assert_eq!(engine.ledger().report().calls(MockScoringProvider::MODEL), 2);
}

#[tokio::test]
async fn test_engine_similarity_is_not_rounded() {
    let provider = Arc::new(MockScoringProvider::new().with_similarity("candidate", 0.5996));
    let mut engine = engine(provider);
    engine.prepare_ideals(&["ideal".to_string()]).await.unwrap();

    let similarity = engine.similarity("candidate").await.unwrap();
    assert!(similarity < 0.6);
    assert!((similarity - 0.5996).abs() < 1e-5);
}
