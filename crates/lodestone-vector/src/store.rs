//! Record store holding the ingested corpus vectors.
//!
//! The store is populated exactly once at startup and is immutable
//! afterwards, so query-time access needs no locking. Records are kept in
//! ingestion order; that order is the tie-break contract for search.

use serde::{Deserialize, Serialize};
use tracing::info;

use lodestone_core::error::{LodestoneError, Result};

/// One indexed document: its derived text and its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub text: String,
    pub embedding: Vec<f32>,
}

impl VectorRecord {
    pub fn new(text: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            text: text.into(),
            embedding,
        }
    }
}

/// In-memory store of [`VectorRecord`]s.
///
/// The first ingested record establishes the store's dimensionality; every
/// later record must match it. `ingest` accepts one batch for the lifetime
/// of the store.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<VectorRecord>,
    dimensions: Option<usize>,
}

impl RecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the store with a batch of records.
    ///
    /// The batch is validated as a whole before anything is stored: a
    /// vector whose length differs from the established dimensionality
    /// fails the call with `DimensionMismatch` and leaves the store
    /// unchanged. Calling `ingest` a second time on a populated store is
    /// an error.
    pub fn ingest(&mut self, records: Vec<VectorRecord>) -> Result<()> {
        if !self.records.is_empty() {
            return Err(LodestoneError::Store(
                "store is already populated; ingest accepts a single batch".to_string(),
            ));
        }

        if let Some(first) = records.first() {
            let expected = first.embedding.len();
            for record in &records {
                if record.embedding.len() != expected {
                    return Err(LodestoneError::DimensionMismatch {
                        expected,
                        actual: record.embedding.len(),
                    });
                }
            }
            self.dimensions = Some(expected);
        }

        info!(count = records.len(), "Record store populated");
        self.records = records;
        Ok(())
    }

    /// Read-only view of the records in ingestion order.
    pub fn records(&self) -> &[VectorRecord] {
        &self.records
    }

    /// Dimensionality established by the first ingested record, if any.
    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
