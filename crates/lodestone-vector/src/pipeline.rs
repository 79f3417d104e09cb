//! Corpus ingestion pipeline.
//!
//! Turns raw corpus entries into [`VectorRecord`]s: null entries are
//! dropped, each remaining article's derived text is embedded, and the
//! output preserves the filtered input order regardless of how the
//! embedding calls interleave.

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use lodestone_core::error::{LodestoneError, Result};
use lodestone_core::types::Article;

use crate::embedding::EmbeddingService;
use crate::store::VectorRecord;

/// Default number of embedding requests in flight at once.
const DEFAULT_CONCURRENCY: usize = 4;

/// Ingestion pipeline generic over the embedding backend.
///
/// Embedding is the only suspending stage; calls run under a bounded
/// buffer that yields results in input order, so a record batch built here
/// can be handed straight to the store.
pub struct IngestionPipeline<E: EmbeddingService> {
    embedder: E,
    concurrency: usize,
}

impl<E: EmbeddingService> IngestionPipeline<E> {
    /// Create a pipeline with an explicit embedding concurrency bound.
    pub fn new(embedder: E, concurrency: usize) -> Self {
        Self {
            embedder,
            concurrency: concurrency.max(1),
        }
    }

    /// Create a pipeline with the default concurrency bound.
    pub fn with_defaults(embedder: E) -> Self {
        Self::new(embedder, DEFAULT_CONCURRENCY)
    }

    /// Build vector records for a batch of corpus entries.
    ///
    /// Entries that are entirely absent are skipped before embedding.
    /// Articles whose derived text is empty are still handed to the
    /// embedder unchanged; what it does with empty input is its concern.
    ///
    /// Fail-fast: the first embedder failure aborts the whole batch,
    /// reported as `Ingestion` with the index of the failing article in
    /// the filtered sequence. Nothing is returned on failure, so a store
    /// never sees a partial batch.
    pub async fn build(&self, documents: Vec<Option<Article>>) -> Result<Vec<VectorRecord>> {
        let total = documents.len();
        let articles: Vec<Article> = documents.into_iter().flatten().collect();
        let skipped = total - articles.len();
        if skipped > 0 {
            debug!(skipped, "Null corpus entries skipped");
        }

        info!(count = articles.len(), "Embedding corpus documents");

        let embedder = &self.embedder;
        let records: Vec<VectorRecord> = stream::iter(articles.into_iter().enumerate())
            .map(|(index, article)| async move {
                let text = article.embedding_text();
                let embedding = embedder.embed(&text).await.map_err(|e| {
                    LodestoneError::Ingestion {
                        index,
                        source: Box::new(e),
                    }
                })?;
                Ok::<_, LodestoneError>(VectorRecord::new(text, embedding))
            })
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        info!(count = records.len(), "Corpus embedded");
        Ok(records)
    }

    /// The embedding concurrency bound.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::MockEmbedding;

    fn article(title: &str, description: &str, content: &str) -> Option<Article> {
        Some(Article {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        })
    }

    fn pipeline() -> IngestionPipeline<MockEmbedding> {
        IngestionPipeline::with_defaults(MockEmbedding::new())
    }

    #[tokio::test]
    async fn test_build_skips_null_entries_and_preserves_order() {
        let documents = vec![
            None,
            article("First", " story", " body"),
            article("Second", " story", " body"),
        ];

        let records = pipeline().build(documents).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "First story body");
        assert_eq!(records[1].text, "Second story body");
    }

    #[tokio::test]
    async fn test_build_embeds_derived_text() {
        let documents = vec![article("Title.", "Description.", "Content.")];
        let records = pipeline().build(documents).await.unwrap();

        let expected = MockEmbedding::new()
            .embed("Title.Description.Content.")
            .await
            .unwrap();
        assert_eq!(records[0].embedding, expected);
    }

    #[tokio::test]
    async fn test_build_preserves_order_under_concurrency() {
        let documents: Vec<Option<Article>> = (0..16)
            .map(|i| article(&format!("Article {}", i), "", ""))
            .collect();

        let records = IngestionPipeline::new(MockEmbedding::new(), 5)
            .build(documents)
            .await
            .unwrap();

        assert_eq!(records.len(), 16);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.text, format!("Article {}", i));
        }
    }

    #[tokio::test]
    async fn test_build_empty_text_is_still_sent_to_embedder() {
        // The mock rejects empty input, so an all-empty article proves the
        // pipeline handed it over rather than filtering it.
        let documents = vec![
            article("Fine", "", ""),
            Some(Article::default()),
            article("Never reached", "", ""),
        ];

        let result = pipeline().build(documents).await;

        match result {
            Err(LodestoneError::Ingestion { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, LodestoneError::EmbedderUnavailable(_)));
            }
            other => panic!("Expected Ingestion error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_build_failure_index_counts_filtered_sequence() {
        // The null at position 0 is dropped before indexing, so the empty
        // article at raw position 2 fails as filtered index 1.
        let documents = vec![None, article("Fine", "", ""), Some(Article::default())];

        let result = pipeline().build(documents).await;
        match result {
            Err(LodestoneError::Ingestion { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected Ingestion error, got {:?}", other.map(|r| r.len())),
        }
    }

    #[tokio::test]
    async fn test_build_empty_corpus() {
        let records = pipeline().build(Vec::new()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_build_all_null_corpus() {
        let records = pipeline().build(vec![None, None]).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_concurrency_floor_is_one() {
        let pipeline = IngestionPipeline::new(MockEmbedding::new(), 0);
        assert_eq!(pipeline.concurrency(), 1);
    }
}
