//! Query session combining the embedder with the similarity engine.
//!
//! One call resolves one query end to end: validate the input, embed it,
//! rank the store, return ordered results.

use std::sync::Arc;

use tracing::debug;

use lodestone_core::error::Result;

use crate::embedding::{DynEmbeddingService, EmbeddingService};
use crate::engine::{SearchResult, SimilarityEngine};
use crate::store::RecordStore;

/// Session answering free-text queries against an ingested store.
///
/// Uses dynamic dispatch (`Box<dyn DynEmbeddingService>`) so that
/// production code can supply `OllamaEmbedding` while tests use
/// `MockEmbedding`.
pub struct QuerySession {
    engine: SimilarityEngine,
    embedder: Box<dyn DynEmbeddingService>,
    top_k: usize,
}

impl QuerySession {
    /// Create a session over a shared store with the given embedder and
    /// result count.
    pub fn new(
        store: Arc<RecordStore>,
        embedder: impl EmbeddingService + 'static,
        top_k: usize,
    ) -> Self {
        Self::new_dyn(store, Box::new(embedder), top_k)
    }

    /// Create a session from a pre-boxed dynamic embedding service.
    pub fn new_dyn(
        store: Arc<RecordStore>,
        embedder: Box<dyn DynEmbeddingService>,
        top_k: usize,
    ) -> Self {
        Self {
            engine: SimilarityEngine::new(store),
            embedder,
            top_k,
        }
    }

    /// Resolve one query: embed the text and rank the store against it.
    ///
    /// Blank or whitespace-only input returns an empty result list without
    /// calling the embedder. Embedder failures surface to the caller; the
    /// store is never touched by a failed query.
    pub async fn run(&self, query_text: &str) -> Result<Vec<SearchResult>> {
        if query_text.trim().is_empty() {
            debug!("Blank query skipped");
            return Ok(Vec::new());
        }

        let query_vec = self.embedder.embed_boxed(query_text).await?;
        self.engine.top_k(&query_vec, self.top_k)
    }

    /// Number of results a query returns at most.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// The engine this session queries.
    pub fn engine(&self) -> &SimilarityEngine {
        &self.engine
    }
}
