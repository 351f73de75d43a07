//! Document repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Document, DocumentId};
use crate::domain::DomainError;

/// Repository for source documents known to the ingestion pipeline
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync + std::fmt::Debug {
    /// Insert or replace a document
    async fn save(&self, document: Document) -> Result<Document, DomainError>;

    /// Find a document by ID
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;

    /// List all known documents
    async fn list(&self) -> Result<Vec<Document>, DomainError>;

    /// Delete a document, returning whether it existed
    async fn delete(&self, id: &DocumentId) -> Result<bool, DomainError>;
}
