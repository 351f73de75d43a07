//! In-memory vector store for development and testing

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::document::{DocumentId, DocumentType};
use crate::domain::embedding::cosine_similarity;
use crate::domain::vector_store::{ensure_same_document, EmbeddingRecord, ScoredChunk, VectorStore};
use crate::domain::DomainError;

/// Records grouped by document, each group ordered by chunk index.
///
/// A document's group is swapped under a single write lock, so readers see
/// either the old or the new record set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVectorStore {
    documents: Arc<RwLock<HashMap<DocumentId, BTreeMap<usize, EmbeddingRecord>>>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, record: EmbeddingRecord) -> Result<(), DomainError> {
        record.validate()?;

        let mut documents = self.documents.write().await;
        documents
            .entry(record.document_id().clone())
            .or_default()
            .insert(record.chunk_index(), record);

        Ok(())
    }

    async fn delete_by_doc_id(&self, document_id: &DocumentId) -> Result<usize, DomainError> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(document_id).map_or(0, |records| records.len()))
    }

    async fn replace_document(
        &self,
        document_id: &DocumentId,
        records: Vec<EmbeddingRecord>,
    ) -> Result<usize, DomainError> {
        ensure_same_document(document_id, &records)?;
        for record in &records {
            record.validate()?;
        }

        let replacement: BTreeMap<usize, EmbeddingRecord> = records
            .into_iter()
            .map(|record| (record.chunk_index(), record))
            .collect();
        let count = replacement.len();

        let mut documents = self.documents.write().await;
        if replacement.is_empty() {
            documents.remove(document_id);
        } else {
            documents.insert(document_id.clone(), replacement);
        }

        Ok(count)
    }

    async fn search(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<DocumentType>,
    ) -> Result<Vec<ScoredChunk>, DomainError> {
        let documents = self.documents.read().await;

        let mut hits: Vec<ScoredChunk> = documents
            .values()
            .flat_map(|records| records.values())
            .filter(|record| filter.is_none_or(|t| record.metadata().document_type == t))
            .map(|record| ScoredChunk::from_record(record, cosine_similarity(vector, record.vector())))
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(k);

        Ok(hits)
    }

    async fn records_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<EmbeddingRecord>, DomainError> {
        let documents = self.documents.read().await;

        Ok(documents
            .get(document_id)
            .map(|records| records.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.values().map(BTreeMap::len).sum())
    }

    fn store_type(&self) -> &'static str {
        "in_memory"
    }
}
