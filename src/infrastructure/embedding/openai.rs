//! OpenAI-compatible embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Known OpenAI embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Embeds one text per request against `/v1/embeddings`
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
    dimensions: Option<usize>,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Create a new provider with custom base URL
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Request shortened vectors (text-embedding-3 models only)
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, text: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        if let Some(dims) = self.dimensions {
            body["dimensions"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<Vec<f32>, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        let embedding = response
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::provider("openai", "No embedding in response"))?;

        if embedding.is_empty() {
            return Err(DomainError::provider("openai", "Empty embedding vector"));
        }

        Ok(embedding)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let url = self.embeddings_url();
        let body = self.build_request(text);

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions.or_else(|| {
            EMBEDDING_MODELS
                .iter()
                .find(|(name, _)| *name == self.model)
                .map(|(_, dims)| *dims)
        })
    }
}

// OpenAI API types for embeddings

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/embeddings";

    fn create_mock_response(dimensions: usize) -> serde_json::Value {
        let embedding: Vec<f32> = (0..dimensions).map(|j| j as f32 * 0.001).collect();

        serde_json::json!({
            "model": "text-embedding-3-small",
            "data": [{"index": 0, "embedding": embedding, "object": "embedding"}],
            "usage": {"prompt_tokens": 10, "total_tokens": 10}
        })
    }

    #[tokio::test]
    async fn test_embed_text() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(1536));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let vector = provider.embed("第十二条 每年6月5日为环境日。").await.unwrap();

        assert_eq!(vector.len(), 1536);
        let (_, body) = provider.client.requests().remove(0);
        assert_eq!(body["input"], "第十二条 每年6月5日为环境日。");
        assert_eq!(body["model"], "text-embedding-3-small");
        assert!(body.get("dimensions").is_none());
    }

    #[tokio::test]
    async fn test_embed_with_custom_dimensions() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(256));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key").with_dimensions(256);

        let vector = provider.embed("Hello").await.unwrap();

        assert_eq!(vector.len(), 256);
        assert_eq!(provider.client.requests()[0].1["dimensions"], 256);
        assert_eq!(provider.dimensions(), Some(256));
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        let result = provider.embed("Hello").await;

        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[tokio::test]
    async fn test_empty_data_is_error() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({"data": [], "model": "m"}));
        let provider = OpenAiEmbeddingProvider::new(client, "test-api-key");

        assert!(provider.embed("Hello").await.is_err());
    }

    #[tokio::test]
    async fn test_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/embeddings";
        let client = MockHttpClient::new().with_response(custom_url, create_mock_response(8));
        let provider = OpenAiEmbeddingProvider::with_base_url(client, "test-key", "http://localhost:8080")
            .with_model("bge-m3");

        let vector = provider.embed("Test").await.unwrap();

        assert_eq!(vector.len(), 8);
        assert_eq!(provider.dimensions(), None);
    }

    #[test]
    fn test_provider_info() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "test-key");

        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.dimensions(), Some(1536));
        assert_eq!(
            provider.with_model("text-embedding-3-large").dimensions(),
            Some(3072)
        );
    }
}
