//! Fixed-window splitting with overlap

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::splitter::helpers;
use crate::domain::ingestion::{DocumentSplitter, SplitterConfig};
use crate::domain::DomainError;

/// Splits text into windows of at most `chunk_size` grapheme clusters.
///
/// A window ends after the last sentence terminator in its second half when
/// there is one, otherwise at the hard limit. The next window starts
/// `chunk_overlap` graphemes before the previous end.
#[derive(Debug, Clone)]
pub struct FixedWindowSplitter {
    prefer_sentence_breaks: bool,
}

impl FixedWindowSplitter {
    pub fn new() -> Self {
        Self {
            prefer_sentence_breaks: true,
        }
    }

    /// Set whether windows may end early on a sentence terminator
    pub fn with_sentence_breaks(mut self, prefer: bool) -> Self {
        self.prefer_sentence_breaks = prefer;
        self
    }

    fn window_end(
        &self,
        graphemes: &[&str],
        start: usize,
        config: &SplitterConfig,
    ) -> usize {
        let target_end = (start + config.chunk_size).min(graphemes.len());

        if !self.prefer_sentence_breaks || target_end == graphemes.len() {
            return target_end;
        }

        // Never break before the overlap, otherwise the next window would not advance
        let earliest = start + (config.chunk_size / 2).max(config.chunk_overlap + 1);
        if earliest >= target_end {
            return target_end;
        }

        (earliest..target_end)
            .rev()
            .find(|&i| helpers::is_sentence_terminator(graphemes[i]))
            .map(|i| i + 1)
            .unwrap_or(target_end)
    }
}

impl Default for FixedWindowSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSplitter for FixedWindowSplitter {
    fn split(&self, text: &str, config: &SplitterConfig) -> Result<Vec<String>, DomainError> {
        config.validate()?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(vec![]);
        }

        let graphemes: Vec<&str> = text.graphemes(true).collect();
        if graphemes.len() <= config.chunk_size {
            return Ok(vec![text.to_string()]);
        }

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = self.window_end(&graphemes, start, config);
            let window = graphemes[start..end].concat();
            let window = window.trim();

            if !window.is_empty() {
                chunks.push(window.to_string());
            }

            if end >= graphemes.len() {
                break;
            }

            start = end - config.chunk_overlap;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "fixed_window"
    }
}
