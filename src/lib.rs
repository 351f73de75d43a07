//! Contract Review RAG
//!
//! Legal document ingestion and resilient contract review reports:
//! - Type-aware splitting (article-level for statutes) and quality filtering
//! - Embedding and vector storage with idempotent per-document reprocessing
//! - Statute retrieval to ground generated report sections
//! - Per-section generation with validation, timeouts and rule-based fallback

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{ContentValidator, DocumentClassifier, DomainError, EmbeddingProvider, LlmProvider};
use infrastructure::{
    document::InMemoryDocumentRepository,
    embedding::OpenAiEmbeddingProvider,
    ingestion::{DocumentProcessor, SplitterFactory},
    llm::{HttpClient, OpenAiProvider},
    report::{LlmContentGenerator, MarkdownFileSink, ReportComposer},
    review::InMemoryContractReviewRepository,
    services::{ReviewService, StatuteRetriever},
    vector_store::InMemoryVectorStore,
};
use tracing::{info, warn};

/// Wired application components
#[derive(Debug, Clone)]
pub struct AppContext {
    pub classifier: DocumentClassifier,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub reviews: Arc<InMemoryContractReviewRepository>,
    pub store: Arc<InMemoryVectorStore>,
    pub processor: Arc<DocumentProcessor>,
    pub review_service: Arc<ReviewService>,
}

/// Create the application context with default configuration
pub fn create_app_context() -> Result<AppContext, DomainError> {
    create_app_context_with_config(&AppConfig::default())
}

/// Create the application context with custom configuration
pub fn create_app_context_with_config(config: &AppConfig) -> Result<AppContext, DomainError> {
    config.validate()?;

    let http_client = HttpClient::with_timeout(config.section_timeout())?;

    let embedder = create_embedding_provider(config, http_client.clone());
    let llm_provider = create_llm_provider(config, http_client);

    let documents = Arc::new(InMemoryDocumentRepository::new());
    let reviews = Arc::new(InMemoryContractReviewRepository::new());
    let store = Arc::new(InMemoryVectorStore::new());

    let processor = DocumentProcessor::new(embedder.clone(), store.clone(), documents.clone())
        .with_splitters(SplitterFactory::new(config.splitter_config()))
        .with_quality_filter(config.quality_filter()?)
        .with_embed_concurrency(config.ingestion.embed_concurrency)
        .with_rebuild_concurrency(config.ingestion.rebuild_concurrency);

    let retriever = Arc::new(StatuteRetriever::new(embedder, store.clone()));
    let generator = LlmContentGenerator::new(llm_provider, config.llm.model.clone())
        .with_retriever(retriever)
        .with_temperature(config.report.temperature)
        .with_max_content_chars(config.report.max_content_chars)
        .with_reference_count(config.report.reference_count);

    let composer = ReportComposer::new(Arc::new(generator), Arc::new(ContentValidator::new()))
        .with_section_timeout(config.section_timeout());
    let sink = MarkdownFileSink::new(config.report.output_dir.clone());

    let review_service = ReviewService::new(reviews.clone(), Arc::new(composer), Arc::new(sink));

    info!(
        llm_model = %config.llm.model,
        embedding_model = %config.embedding.model,
        "Application context created"
    );

    Ok(AppContext {
        classifier: DocumentClassifier::new(),
        documents,
        reviews,
        store,
        processor: Arc::new(processor),
        review_service: Arc::new(review_service),
    })
}

fn create_llm_provider(config: &AppConfig, client: HttpClient) -> Arc<dyn LlmProvider> {
    let api_key = config.llm.api_key.clone().unwrap_or_else(|| {
        warn!("No LLM API key configured, report sections will use rule-based fallbacks");
        String::new()
    });

    Arc::new(OpenAiProvider::with_base_url(client, api_key, &config.llm.base_url))
}

fn create_embedding_provider(config: &AppConfig, client: HttpClient) -> Arc<dyn EmbeddingProvider> {
    let api_key = config.embedding.api_key.clone().unwrap_or_else(|| {
        warn!("No embedding API key configured, chunks will fail to embed");
        String::new()
    });

    let mut provider =
        OpenAiEmbeddingProvider::with_base_url(client, api_key, &config.embedding.base_url)
            .with_model(config.embedding.model.clone());

    if let Some(dimensions) = config.embedding.dimensions {
        provider = provider.with_dimensions(dimensions);
    }

    Arc::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DocumentId, DocumentType};
    use crate::domain::{Document, DocumentRepository, VectorStore};

    #[tokio::test]
    async fn test_context_from_defaults() {
        let context = create_app_context().unwrap();

        assert_eq!(context.store.count().await.unwrap(), 0);
        assert_eq!(
            context.classifier.classify("民法典.txt", ""),
            DocumentType::Statute
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AppConfig::default();
        config.ingestion.chunk_overlap = config.ingestion.chunk_size;

        assert!(create_app_context_with_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_context_store_is_shared() {
        let context = create_app_context().unwrap();
        let document = Document::new(
            DocumentId::new("blank").unwrap(),
            "   ",
            DocumentType::Other,
            "blank.txt",
        )
        .unwrap();

        let result = context.processor.ingest(document).await.unwrap();

        assert_eq!(result.chunks_stored, 0);
        assert_eq!(context.documents.list().await.unwrap().len(), 1);
    }
}
