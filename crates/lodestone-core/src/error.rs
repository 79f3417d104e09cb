use thiserror::Error;

/// Top-level error type for the Lodestone system.
///
/// One variant per subsystem concern. Crates return this type directly so
/// that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LodestoneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus load failed: {0}")]
    CorpusLoad(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Ingestion failed at document {index}: {source}")]
    Ingestion {
        index: usize,
        #[source]
        source: Box<LodestoneError>,
    },

    #[error("Embedder unavailable: {0}")]
    EmbedderUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for LodestoneError {
    fn from(err: toml::de::Error) -> Self {
        LodestoneError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LodestoneError {
    fn from(err: toml::ser::Error) -> Self {
        LodestoneError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for LodestoneError {
    fn from(err: serde_json::Error) -> Self {
        LodestoneError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Lodestone operations.
pub type Result<T> = std::result::Result<T, LodestoneError>;
