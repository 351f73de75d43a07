//! Ingestion result types

use serde::{Deserialize, Serialize};

use crate::domain::document::DocumentId;

/// A chunk that could not be embedded and was skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkFailure {
    pub chunk_index: usize,
    pub message: String,
}

impl ChunkFailure {
    pub fn new(chunk_index: usize, message: impl Into<String>) -> Self {
        Self {
            chunk_index,
            message: message.into(),
        }
    }
}

/// Result of processing a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionResult {
    pub document_id: DocumentId,
    /// Chunks produced by the splitter
    pub chunks_split: usize,
    /// Chunks dropped by the quality filter
    pub chunks_filtered: usize,
    /// Chunks embedded and persisted
    pub chunks_stored: usize,
    /// Chunks skipped because embedding failed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ChunkFailure>,
}

impl IngestionResult {
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            chunks_split: 0,
            chunks_filtered: 0,
            chunks_stored: 0,
            failures: Vec::new(),
        }
    }

    pub fn chunks_failed(&self) -> usize {
        self.failures.len()
    }

    /// True when every surviving chunk was stored
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of rebuilding every known document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RebuildSummary {
    pub documents: usize,
    pub chunks_stored: usize,
    pub chunks_failed: usize,
    pub results: Vec<IngestionResult>,
}

impl RebuildSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: IngestionResult) {
        self.documents += 1;
        self.chunks_stored += result.chunks_stored;
        self.chunks_failed += result.chunks_failed();
        self.results.push(result);
    }
}
