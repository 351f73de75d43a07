//! Source documents and their classification

mod classifier;
mod entity;
mod repository;

pub(crate) use classifier::ARTICLE_MARKER;
pub use classifier::DocumentClassifier;
pub use entity::{Document, DocumentId, DocumentType};
pub use repository::DocumentRepository;

#[cfg(test)]
pub use repository::MockDocumentRepository;
