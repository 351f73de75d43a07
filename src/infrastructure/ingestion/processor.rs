//! Document processor: split, filter, embed and store

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument, warn};

use crate::domain::document::{Document, DocumentId, DocumentRepository};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::ingestion::{
    Chunk, ChunkFailure, IngestionResult, QualityFilter, RebuildSummary,
};
use crate::domain::vector_store::{EmbeddingRecord, VectorStore};
use crate::domain::DomainError;

use super::factory::SplitterFactory;
use super::keyed_lock::KeyedLock;

const DEFAULT_EMBED_CONCURRENCY: usize = 4;
const DEFAULT_REBUILD_CONCURRENCY: usize = 2;

/// Orchestrates ingestion per document.
///
/// Every write for a document id runs under that id's lock, and a document's
/// records are swapped in one `replace_document` call after all embeddings
/// are computed. Embedding failures skip the affected chunk; store and
/// repository failures abort the call.
#[derive(Debug)]
pub struct DocumentProcessor {
    splitters: SplitterFactory,
    filter: QualityFilter,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    documents: Arc<dyn DocumentRepository>,
    locks: KeyedLock<DocumentId>,
    embed_concurrency: usize,
    rebuild_concurrency: usize,
}

impl DocumentProcessor {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        documents: Arc<dyn DocumentRepository>,
    ) -> Self {
        Self {
            splitters: SplitterFactory::default(),
            filter: QualityFilter::default(),
            embedder,
            store,
            documents,
            locks: KeyedLock::new(),
            embed_concurrency: DEFAULT_EMBED_CONCURRENCY,
            rebuild_concurrency: DEFAULT_REBUILD_CONCURRENCY,
        }
    }

    pub fn with_splitters(mut self, splitters: SplitterFactory) -> Self {
        self.splitters = splitters;
        self
    }

    pub fn with_quality_filter(mut self, filter: QualityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Maximum in-flight embedding calls per document
    pub fn with_embed_concurrency(mut self, concurrency: usize) -> Self {
        self.embed_concurrency = concurrency.max(1);
        self
    }

    /// Maximum documents rebuilt at once
    pub fn with_rebuild_concurrency(mut self, concurrency: usize) -> Self {
        self.rebuild_concurrency = concurrency.max(1);
        self
    }

    /// Split, filter, embed and store one document, replacing any records
    /// previously stored for its id
    pub async fn process(&self, document: &Document) -> Result<IngestionResult, DomainError> {
        let _guard = self.locks.lock(document.id()).await;
        self.process_locked(document).await
    }

    /// Re-run processing for a stored document
    pub async fn reprocess(&self, id: &DocumentId) -> Result<IngestionResult, DomainError> {
        let _guard = self.locks.lock(id).await;

        let document = self
            .documents
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Document '{}' not found", id)))?;

        self.process_locked(&document).await
    }

    /// Save the document, then process it
    pub async fn ingest(&self, document: Document) -> Result<IngestionResult, DomainError> {
        let _guard = self.locks.lock(document.id()).await;

        let document = self.documents.save(document).await?;
        self.process_locked(&document).await
    }

    /// Remove a document and all of its records, returning how many records
    /// were removed
    pub async fn delete_document(&self, id: &DocumentId) -> Result<usize, DomainError> {
        let _guard = self.locks.lock(id).await;

        let removed = self.store.delete_by_doc_id(id).await?;
        self.documents.delete(id).await?;

        info!(document_id = %id, records_removed = removed, "Document deleted");
        Ok(removed)
    }

    /// Records currently stored for a document, ordered by chunk index
    pub async fn stored_chunks(&self, id: &DocumentId) -> Result<Vec<EmbeddingRecord>, DomainError> {
        let mut records = self.store.records_for_document(id).await?;
        records.sort_by_key(EmbeddingRecord::chunk_index);
        Ok(records)
    }

    /// Reprocess every known document.
    ///
    /// Documents are rebuilt independently; the first store or repository
    /// error stops the rebuild. Documents deleted while the rebuild runs are
    /// skipped.
    pub async fn rebuild_all(&self) -> Result<RebuildSummary, DomainError> {
        let ids: Vec<DocumentId> = self
            .documents
            .list()
            .await?
            .into_iter()
            .map(|document| document.id().clone())
            .collect();

        info!(documents = ids.len(), "Rebuilding vector store");

        let mut results: Vec<IngestionResult> = stream::iter(ids)
            .map(|id| async move {
                match self.reprocess(&id).await {
                    Ok(result) => Ok(Some(result)),
                    Err(DomainError::NotFound { .. }) => {
                        debug!(document_id = %id, "Document removed during rebuild, skipping");
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            })
            .buffer_unordered(self.rebuild_concurrency)
            .try_filter_map(|result| async move { Ok(result) })
            .try_collect()
            .await?;

        results.sort_by(|a, b| a.document_id.as_str().cmp(b.document_id.as_str()));

        let mut summary = RebuildSummary::new();
        for result in results {
            summary.add(result);
        }

        info!(
            documents = summary.documents,
            chunks_stored = summary.chunks_stored,
            chunks_failed = summary.chunks_failed,
            "Rebuild complete"
        );

        Ok(summary)
    }

    #[instrument(skip(self, document), fields(document_id = %document.id(), document_type = %document.document_type()))]
    async fn process_locked(&self, document: &Document) -> Result<IngestionResult, DomainError> {
        let document_type = document.document_type();
        let mut result = IngestionResult::new(document.id().clone());

        let pieces = self.splitters.split(document.text(), document_type)?;
        result.chunks_split = pieces.len();

        // Indices are splitter positions, so they stay stable across filter changes
        let chunks: Vec<Chunk> = pieces
            .into_iter()
            .enumerate()
            .filter(|(_, text)| self.filter.keep(text, document_type))
            .map(|(index, text)| Chunk::new(document.id().clone(), index, text))
            .collect();
        result.chunks_filtered = result.chunks_split - chunks.len();

        debug!(
            chunks_split = result.chunks_split,
            chunks_filtered = result.chunks_filtered,
            "Document split"
        );

        let embedded: Vec<(Chunk, Result<Vec<f32>, DomainError>)> = stream::iter(chunks)
            .map(|chunk| async move {
                let vector = self.embedder.embed(chunk.text()).await;
                (chunk, vector)
            })
            .buffer_unordered(self.embed_concurrency)
            .collect()
            .await;

        let mut records = Vec::with_capacity(embedded.len());
        for (chunk, vector) in embedded {
            let record = vector.and_then(|vector| {
                EmbeddingRecord::new(&chunk, vector, document.filename(), document_type)
            });

            match record {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(chunk_index = chunk.index(), error = %e, "Skipping chunk that could not be embedded");
                    result.failures.push(ChunkFailure::new(chunk.index(), e.to_string()));
                }
            }
        }

        records.sort_by_key(EmbeddingRecord::chunk_index);
        result.failures.sort_by_key(|failure| failure.chunk_index);

        result.chunks_stored = self.store.replace_document(document.id(), records).await?;

        info!(
            chunks_stored = result.chunks_stored,
            chunks_failed = result.chunks_failed(),
            "Document processed"
        );

        Ok(result)
    }
}
