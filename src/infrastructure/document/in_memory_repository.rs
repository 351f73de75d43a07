//! In-memory document repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::document::{Document, DocumentId, DocumentRepository};
use crate::domain::DomainError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: Document) -> Result<Document, DomainError> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id().clone(), document.clone());
        Ok(document)
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut list: Vec<Document> = documents.values().cloned().collect();
        list.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(list)
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, DomainError> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(id).is_some())
    }
}
