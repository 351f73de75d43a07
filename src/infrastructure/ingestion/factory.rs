//! Splitter selection by document type

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::document::DocumentType;
use crate::domain::ingestion::{DocumentSplitter, SplitterConfig};
use crate::domain::DomainError;

use super::splitters::{FixedWindowSplitter, StatuteSplitter};

/// Lookup table from document type to splitter.
///
/// Types without an entry use the generic fixed-window splitter.
#[derive(Debug, Clone)]
pub struct SplitterFactory {
    splitters: HashMap<DocumentType, Arc<dyn DocumentSplitter>>,
    default: Arc<dyn DocumentSplitter>,
    config: SplitterConfig,
}

impl SplitterFactory {
    /// Statute text splits on articles; everything else uses fixed windows
    pub fn new(config: SplitterConfig) -> Self {
        let statute: Arc<dyn DocumentSplitter> = Arc::new(StatuteSplitter::new());

        Self {
            splitters: HashMap::from([(DocumentType::Statute, statute)]),
            default: Arc::new(FixedWindowSplitter::new()),
            config,
        }
    }

    /// Register or replace the splitter for one type
    pub fn with_splitter(
        mut self,
        document_type: DocumentType,
        splitter: Arc<dyn DocumentSplitter>,
    ) -> Self {
        self.splitters.insert(document_type, splitter);
        self
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Get the splitter used for a type
    pub fn splitter_for(&self, document_type: DocumentType) -> Arc<dyn DocumentSplitter> {
        self.splitters
            .get(&document_type)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    pub fn split(&self, text: &str, document_type: DocumentType) -> Result<Vec<String>, DomainError> {
        self.splitter_for(document_type).split(text, &self.config)
    }
}

impl Default for SplitterFactory {
    fn default() -> Self {
        Self::new(SplitterConfig::default())
    }
}
