//! Embedding records and search hits

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::document::{DocumentId, DocumentType};
use crate::domain::ingestion::Chunk;
use crate::domain::DomainError;

/// Metadata carried by every stored record. All four fields are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub document_id: DocumentId,
    pub filename: String,
    pub document_type: DocumentType,
    pub chunk_index: usize,
}

impl RecordMetadata {
    /// Convert to JSON value map
    pub fn to_json_map(&self) -> HashMap<String, serde_json::Value> {
        HashMap::from([
            (
                "document_id".to_string(),
                serde_json::Value::String(self.document_id.to_string()),
            ),
            (
                "filename".to_string(),
                serde_json::Value::String(self.filename.clone()),
            ),
            (
                "document_type".to_string(),
                serde_json::Value::String(self.document_type.to_string()),
            ),
            (
                "chunk_index".to_string(),
                serde_json::Value::Number(self.chunk_index.into()),
            ),
        ])
    }
}

/// Chunk text plus its vector and metadata, keyed by `{doc_id}_chunk_{index}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    id: String,
    text: String,
    vector: Vec<f32>,
    metadata: RecordMetadata,
}

impl EmbeddingRecord {
    /// Build a record for a chunk; fails when any field is incomplete
    pub fn new(
        chunk: &Chunk,
        vector: Vec<f32>,
        filename: impl Into<String>,
        document_type: DocumentType,
    ) -> Result<Self, DomainError> {
        let metadata = RecordMetadata {
            document_id: chunk.document_id().clone(),
            filename: filename.into(),
            document_type,
            chunk_index: chunk.index(),
        };

        let record = Self {
            id: Self::record_id(chunk.document_id(), chunk.index()),
            text: chunk.text().to_string(),
            vector,
            metadata,
        };

        record.validate()?;
        Ok(record)
    }

    /// Stable storage key for a chunk
    pub fn record_id(document_id: &DocumentId, chunk_index: usize) -> String {
        format!("{}_chunk_{}", document_id, chunk_index)
    }

    /// Check the completeness invariant
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.metadata.filename.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Record {} has no filename",
                self.id
            )));
        }

        if self.text.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Record {} has no text",
                self.id
            )));
        }

        if self.vector.is_empty() {
            return Err(DomainError::validation(format!(
                "Record {} has an empty vector",
                self.id
            )));
        }

        let expected = Self::record_id(&self.metadata.document_id, self.metadata.chunk_index);
        if self.id != expected {
            return Err(DomainError::validation(format!(
                "Record id {} does not match metadata (expected {})",
                self.id, expected
            )));
        }

        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.metadata.document_id
    }

    pub fn chunk_index(&self) -> usize {
        self.metadata.chunk_index
    }
}

/// A ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub id: String,
    pub text: String,
    pub metadata: RecordMetadata,
    pub score: f32,
}

impl ScoredChunk {
    pub fn from_record(record: &EmbeddingRecord, score: f32) -> Self {
        Self {
            id: record.id.clone(),
            text: record.text.clone(),
            metadata: record.metadata.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk() -> Chunk {
        Chunk::new(DocumentId::new("env-law").unwrap(), 4, "第十二条 每年6月5日为环境日。")
    }

    #[test]
    fn test_record_carries_full_metadata() {
        let record =
            EmbeddingRecord::new(&chunk(), vec![0.1, 0.2], "环境保护法.txt", DocumentType::Statute)
                .unwrap();

        assert_eq!(record.id(), "env-law_chunk_4");
        assert_eq!(record.chunk_index(), 4);
        assert_eq!(record.metadata().filename, "环境保护法.txt");

        let map = record.metadata().to_json_map();
        assert_eq!(map.len(), 4);
        assert_eq!(
            map.get("document_type"),
            Some(&serde_json::Value::String("STATUTE".to_string()))
        );
    }

    #[test]
    fn test_incomplete_records_rejected() {
        assert!(EmbeddingRecord::new(&chunk(), vec![0.1], " ", DocumentType::Statute).is_err());
        assert!(EmbeddingRecord::new(&chunk(), vec![], "law.txt", DocumentType::Statute).is_err());
    }

    #[test]
    fn test_deserialized_record_is_validated() {
        let json = serde_json::json!({
            "id": "env-law_chunk_1",
            "text": "第一条",
            "vector": [0.5],
            "metadata": {
                "document_id": "env-law",
                "filename": "",
                "document_type": "STATUTE",
                "chunk_index": 1
            }
        });

        let record: EmbeddingRecord = serde_json::from_value(json).unwrap();
        assert!(record.validate().is_err());
    }
}
