//! Document ingestion domain types and traits
//!
//! This module provides:
//! - `DocumentSplitter` trait for turning raw text into ordered chunks
//! - `QualityFilter` for dropping low-value chunks by document type
//! - Result types reported by the document processor

pub mod chunk;
pub mod pipeline;
pub mod quality;
pub mod splitter;

pub use chunk::Chunk;
pub use pipeline::{ChunkFailure, IngestionResult, RebuildSummary};
pub use quality::{QualityFilter, DEFAULT_MIN_CHUNK_LENGTH, STATUTE_MIN_CHUNK_LENGTH};
pub use splitter::{DocumentSplitter, SplitterConfig};

#[cfg(test)]
pub use splitter::mock::MockDocumentSplitter;
