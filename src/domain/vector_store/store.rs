//! Vector store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRecord, ScoredChunk};
use crate::domain::document::{DocumentId, DocumentType};
use crate::domain::DomainError;

/// Persistence contract for embedding records.
///
/// Errors from a store are storage errors and are never masked by callers.
#[async_trait]
pub trait VectorStore: Send + Sync + Debug {
    /// Insert or overwrite a record by its id
    async fn upsert(&self, record: EmbeddingRecord) -> Result<(), DomainError>;

    /// Remove every record of a document, returning how many were removed
    async fn delete_by_doc_id(&self, document_id: &DocumentId) -> Result<usize, DomainError>;

    /// Replace the full record set of a document.
    ///
    /// The default deletes then upserts; stores that can swap the set in one
    /// step should override this so readers never see a partial set.
    async fn replace_document(
        &self,
        document_id: &DocumentId,
        records: Vec<EmbeddingRecord>,
    ) -> Result<usize, DomainError> {
        ensure_same_document(document_id, &records)?;

        self.delete_by_doc_id(document_id).await?;

        let count = records.len();
        for record in records {
            self.upsert(record).await?;
        }

        Ok(count)
    }

    /// Rank records by similarity to `vector`, optionally restricted to one type
    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<DocumentType>,
    ) -> Result<Vec<ScoredChunk>, DomainError>;

    /// All records of a document, ordered by chunk index
    async fn records_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<EmbeddingRecord>, DomainError>;

    /// Total number of stored records
    async fn count(&self) -> Result<usize, DomainError>;

    /// Get the store type name
    fn store_type(&self) -> &'static str;
}

/// Reject record sets that mix documents
pub fn ensure_same_document(
    document_id: &DocumentId,
    records: &[EmbeddingRecord],
) -> Result<(), DomainError> {
    match records.iter().find(|r| r.document_id() != document_id) {
        Some(stray) => Err(DomainError::validation(format!(
            "Record {} does not belong to document {}",
            stray.id(),
            document_id
        ))),
        None => Ok(()),
    }
}
