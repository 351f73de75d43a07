//! Statute retrieval for grounding generated sections

use std::sync::Arc;

use tracing::debug;

use crate::domain::document::DocumentType;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::vector_store::{ScoredChunk, VectorStore};
use crate::domain::DomainError;

const DEFAULT_MAX_QUERY_CHARS: usize = 2000;

/// Finds the statute articles most similar to a contract text
#[derive(Debug, Clone)]
pub struct StatuteRetriever {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    max_query_chars: usize,
}

impl StatuteRetriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }

    /// Limit how much of the query text is embedded
    pub fn with_max_query_chars(mut self, max_query_chars: usize) -> Self {
        self.max_query_chars = max_query_chars.max(1);
        self
    }

    pub async fn retrieve(&self, query_text: &str, k: usize) -> Result<Vec<ScoredChunk>, DomainError> {
        let query = truncate_chars(query_text.trim(), self.max_query_chars);
        if query.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        let hits = self
            .store
            .search(&vector, k, Some(DocumentType::Statute))
            .await?;

        debug!(hits = hits.len(), "Retrieved statute references");
        Ok(hits)
    }
}

/// Longest prefix of at most `max_chars` characters
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
