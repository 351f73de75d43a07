//! Type-aware chunk quality filter

use std::collections::HashMap;

use crate::domain::document::DocumentType;

/// Minimum chunk length for types without an explicit threshold
pub const DEFAULT_MIN_CHUNK_LENGTH: usize = 50;

/// Statutory articles are legitimately short and must survive filtering
pub const STATUTE_MIN_CHUNK_LENGTH: usize = 10;

/// Keeps or drops chunks using per-type minimum lengths (in characters).
///
/// Whitespace-only chunks are always dropped, even when the filter is
/// disabled or the threshold is zero.
#[derive(Debug, Clone)]
pub struct QualityFilter {
    enabled: bool,
    default_min_length: usize,
    thresholds: HashMap<DocumentType, usize>,
}

impl QualityFilter {
    /// Filter with the default policy: 50 characters, 10 for statutes
    pub fn new() -> Self {
        Self {
            enabled: true,
            default_min_length: DEFAULT_MIN_CHUNK_LENGTH,
            thresholds: HashMap::from([(DocumentType::Statute, STATUTE_MIN_CHUNK_LENGTH)]),
        }
    }

    /// Build a filter from an explicit threshold table
    pub fn with_thresholds(
        default_min_length: usize,
        thresholds: HashMap<DocumentType, usize>,
    ) -> Self {
        Self {
            enabled: true,
            default_min_length,
            thresholds,
        }
    }

    /// Minimum length for types without their own threshold
    pub fn with_default_min_length(mut self, min_length: usize) -> Self {
        self.default_min_length = min_length;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set or replace the threshold for one document type
    pub fn with_threshold(mut self, document_type: DocumentType, min_length: usize) -> Self {
        self.thresholds.insert(document_type, min_length);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Minimum length applied to the given type
    pub fn min_length(&self, document_type: DocumentType) -> usize {
        self.thresholds
            .get(&document_type)
            .copied()
            .unwrap_or(self.default_min_length)
    }

    /// Decide whether a chunk survives
    pub fn keep(&self, chunk_text: &str, document_type: DocumentType) -> bool {
        let trimmed = chunk_text.trim();

        if trimmed.is_empty() {
            return false;
        }

        if !self.enabled {
            return true;
        }

        trimmed.chars().count() >= self.min_length(document_type)
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new()
    }
}
