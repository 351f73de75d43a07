//! Splitter trait and configuration

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Window configuration for splitters, measured in characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive windows in characters
    pub chunk_overlap: usize,
}

impl SplitterConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 800,
            chunk_overlap: 100,
        }
    }
}

/// Turns raw text into ordered chunk strings.
///
/// Implementations must be deterministic: the same text and configuration
/// always yield the same sequence.
pub trait DocumentSplitter: Send + Sync + Debug {
    fn split(&self, text: &str, config: &SplitterConfig) -> Result<Vec<String>, DomainError>;

    /// Get the strategy name
    fn name(&self) -> &'static str;
}

/// Helper functions for splitting
pub mod helpers {
    /// Sentence terminators, full- and half-width
    pub const SENTENCE_TERMINATORS: &[&str] = &["。", "！", "？", "；", "!", "?", ";", "\n"];

    pub fn is_sentence_terminator(grapheme: &str) -> bool {
        SENTENCE_TERMINATORS.contains(&grapheme)
    }
}
