//! Brute-force cosine similarity search over the record store.
//!
//! All operations are O(n * d) per query, which is the right algorithm for
//! a corpus of tens to low thousands of documents. The ranking contract
//! (descending similarity, ties broken by ingestion order) must be
//! preserved by any future index structure swapped in behind `top_k`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lodestone_core::error::{LodestoneError, Result};

use crate::store::RecordStore;

/// A single search result: the matching record's text and its similarity
/// to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    /// Cosine similarity score (-1.0 to 1.0).
    pub score: f64,
}

/// Similarity engine over a shared read-only record store.
///
/// Pure: a query has no side effects on the store or the engine.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    store: Arc<RecordStore>,
}

impl SimilarityEngine {
    /// Create an engine over the given store.
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Return the `min(k, store size)` records most similar to the query
    /// vector, sorted by descending cosine similarity.
    ///
    /// Equal scores preserve ingestion order (stable sort); that tie-break
    /// is part of the contract, not an implementation accident. An empty
    /// store yields an empty result for any query and any k.
    pub fn top_k(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if self.store.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(expected) = self.store.dimensions() {
            if query.len() != expected {
                return Err(LodestoneError::DimensionMismatch {
                    expected,
                    actual: query.len(),
                });
            }
        }

        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<SearchResult> = self
            .store
            .records()
            .iter()
            .map(|record| SearchResult {
                text: record.text.clone(),
                score: cosine_similarity(query, &record.embedding),
            })
            .collect();

        // Stable sort by descending score keeps ingestion order on ties.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }

    /// The store this engine searches.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

/// Compute cosine similarity between two equal-length vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();

    let mag_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::VectorRecord;

    fn engine_with(records: Vec<VectorRecord>) -> SimilarityEngine {
        let mut store = RecordStore::new();
        store.ingest(records).unwrap();
        SimilarityEngine::new(Arc::new(store))
    }

    fn record(text: &str, embedding: Vec<f32>) -> VectorRecord {
        VectorRecord::new(text, embedding)
    }

    #[test]
    fn test_top_k_orders_by_descending_similarity() {
        let engine = engine_with(vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![0.0, 1.0]),
            record("c", vec![0.9, 0.1]),
        ]);

        let hits = engine.top_k(&[1.0, 0.0], 2).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "a");
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert_eq!(hits[1].text, "c");
        let expected_c = 0.9 / (0.9f64.powi(2) + 0.1f64.powi(2)).sqrt();
        assert!((hits[1].score - expected_c).abs() < 1e-4);
    }

    #[test]
    fn test_top_k_with_k_larger_than_store_returns_all() {
        let engine = engine_with(vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![0.0, 1.0]),
        ]);

        let hits = engine.top_k(&[1.0, 0.0], 100).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn test_top_k_ties_preserve_ingestion_order() {
        // Identical vectors score identically against any query.
        let engine = engine_with(vec![
            record("first", vec![1.0, 1.0]),
            record("second", vec![1.0, 1.0]),
            record("third", vec![1.0, 1.0]),
        ]);

        let hits = engine.top_k(&[1.0, 0.0], 3).unwrap();
        let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_top_k_zero_k_returns_empty() {
        let engine = engine_with(vec![record("a", vec![1.0, 0.0])]);
        let hits = engine.top_k(&[1.0, 0.0], 0).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_top_k_empty_store_returns_empty() {
        let engine = SimilarityEngine::new(Arc::new(RecordStore::new()));
        let hits = engine.top_k(&[1.0, 0.0, 0.0], 10).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_top_k_dimension_mismatch() {
        let engine = engine_with(vec![record("a", vec![1.0, 0.0])]);
        let result = engine.top_k(&[1.0, 0.0, 0.0], 5);
        assert!(matches!(
            result,
            Err(LodestoneError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_zero_query_vector_scores_zero_everywhere() {
        let engine = engine_with(vec![
            record("a", vec![1.0, 0.0]),
            record("b", vec![0.0, 1.0]),
        ]);

        let hits = engine.top_k(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, 0.0);
        assert_eq!(hits[1].score, 0.0);
        // Ties on zero fall back to ingestion order.
        assert_eq!(hits[0].text, "a");
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![0.3f32; 100];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.2f32, 0.7, -0.1, 0.4];
        let b = vec![0.9f32, -0.3, 0.5, 0.0];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let mut a = vec![0.0f32; 100];
        let mut b = vec![0.0f32; 100];
        a[0] = 1.0;
        b[1] = 1.0;
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let a = vec![0.0f32; 100];
        let b = vec![1.0f32; 100];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
    }

    #[test]
    fn test_cosine_similarity_opposite_vectors() {
        let a = vec![1.0f32; 10];
        let b = vec![-1.0f32; 10];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }
}
