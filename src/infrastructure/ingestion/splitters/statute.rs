//! Article-aware splitting for statute text

use crate::domain::document::ARTICLE_MARKER;
use crate::domain::ingestion::{DocumentSplitter, SplitterConfig};
use crate::domain::DomainError;

use super::FixedWindowSplitter;

/// Splits statute text on line-leading article markers (`第十二条`).
///
/// Text before the first article becomes its own chunk. Articles longer than
/// `chunk_size` characters are windowed; text without any article marker is
/// windowed as a whole.
#[derive(Debug, Clone, Default)]
pub struct StatuteSplitter {
    window: FixedWindowSplitter,
}

impl StatuteSplitter {
    pub fn new() -> Self {
        Self {
            window: FixedWindowSplitter::new(),
        }
    }

    fn push_segment(
        &self,
        chunks: &mut Vec<String>,
        segment: &str,
        config: &SplitterConfig,
    ) -> Result<(), DomainError> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Ok(());
        }

        if segment.chars().count() <= config.chunk_size {
            chunks.push(segment.to_string());
        } else {
            chunks.extend(self.window.split(segment, config)?);
        }

        Ok(())
    }
}

impl DocumentSplitter for StatuteSplitter {
    fn split(&self, text: &str, config: &SplitterConfig) -> Result<Vec<String>, DomainError> {
        config.validate()?;

        let starts: Vec<usize> = ARTICLE_MARKER.find_iter(text).map(|m| m.start()).collect();

        if starts.is_empty() {
            return self.window.split(text, config);
        }

        let mut chunks = Vec::with_capacity(starts.len() + 1);

        self.push_segment(&mut chunks, &text[..starts[0]], config)?;

        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            self.push_segment(&mut chunks, &text[start..end], config)?;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "statute"
    }
}
