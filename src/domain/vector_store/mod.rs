//! Vector store domain - embedding records and the store contract

mod record;
mod store;

pub use record::{EmbeddingRecord, RecordMetadata, ScoredChunk};
pub use store::{ensure_same_document, VectorStore};

#[cfg(test)]
pub use store::mock::UnavailableVectorStore;
