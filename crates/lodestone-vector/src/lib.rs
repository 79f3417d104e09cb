//! Lodestone vector crate - record store, similarity engine, embedding
//! services, ingestion pipeline, and query session.
//!
//! Provides an in-memory vector store with brute-force cosine similarity
//! search, an embedding service trait with Ollama and mock
//! implementations, the corpus ingestion pipeline, and the per-query
//! session that ties them together.

pub mod embedding;
pub mod engine;
pub mod pipeline;
pub mod search;
pub mod store;

pub use embedding::{EmbeddingService, MockEmbedding, OllamaEmbedding};
pub use engine::{SearchResult, SimilarityEngine};
pub use pipeline::IngestionPipeline;
pub use search::QuerySession;
pub use store::{RecordStore, VectorRecord};
