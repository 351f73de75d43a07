//! Chunk entity

use serde::{Deserialize, Serialize};

use crate::domain::document::DocumentId;

/// A contiguous text span of a document, the unit of embedding and storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    text: String,
    index: usize,
    document_id: DocumentId,
    char_length: usize,
}

impl Chunk {
    pub fn new(document_id: DocumentId, index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let char_length = text.chars().count();

        Self {
            text,
            index,
            document_id,
            char_length,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of this chunk in the splitter output (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    /// Length in characters, not bytes
    pub fn char_length(&self) -> usize {
        self.char_length
    }
}
