//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for embedding providers.
///
/// A failure applies to the single text passed in; callers embedding many
/// chunks treat it as a per-chunk problem, never as batch-fatal.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Embed one text into a fixed-dimension vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the embedding dimensions, when known
    fn dimensions(&self) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Deterministic embedder; texts containing a failure marker are rejected
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        fail_markers: Vec<String>,
        fail_all: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                fail_markers: Vec::new(),
                fail_all: false,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing_on(mut self, marker: impl Into<String>) -> Self {
            self.fail_markers.push(marker.into());
            self
        }

        pub fn failing_always(mut self) -> Self {
            self.fail_all = true;
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if self.fail_all || self.fail_markers.iter().any(|m| text.contains(m.as_str())) {
                return Err(DomainError::provider("mock", "embedding rejected"));
            }

            // Deterministic vector derived from the text bytes
            let hash = text
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            let vector = (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64 * 7919) % 1000) as f32 / 1000.0) - 0.5)
                .collect();

            Ok(vector)
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }

        fn dimensions(&self) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new(16);

            let first = provider.embed("第一条").await.unwrap();
            let second = provider.embed("第一条").await.unwrap();

            assert_eq!(first.len(), 16);
            assert_eq!(first, second);
            assert_eq!(provider.calls(), 2);
        }

        #[tokio::test]
        async fn test_failure_marker() {
            let provider = MockEmbeddingProvider::new(8).failing_on("BAD");

            assert!(provider.embed("good text").await.is_ok());
            assert!(provider.embed("a BAD text").await.is_err());
        }
    }
}
