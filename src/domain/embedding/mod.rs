//! Embedding provider domain models and traits

mod provider;
mod similarity;

pub use provider::EmbeddingProvider;
pub use similarity::cosine_similarity;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
