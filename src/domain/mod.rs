//! Domain layer - Core business logic and entities

pub mod document;
pub mod embedding;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod report;
pub mod review;
pub mod vector_store;

pub use document::{Document, DocumentClassifier, DocumentId, DocumentRepository, DocumentType};
pub use embedding::{cosine_similarity, EmbeddingProvider};
pub use error::DomainError;
pub use ingestion::{
    Chunk, ChunkFailure, DocumentSplitter, IngestionResult, QualityFilter, RebuildSummary,
    SplitterConfig,
};
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, LlmResponseFormat,
    Message, MessageRole, Usage,
};
pub use report::{
    ContentValidation, ContentValidator, FallbackContent, ReportSink, ResolvedSection,
    ResolvedSections, SectionKind, SectionLifecycle, SectionResolution, SectionSource,
    SectionState, StructuredContentGenerator, TemplateRenderer,
};
pub use review::{
    ContractReview, ContractReviewRepository, DeepAnalysis, ExecutiveSummary,
    ImprovementSuggestions, ReviewId, RiskLevel,
};
pub use vector_store::{EmbeddingRecord, RecordMetadata, ScoredChunk, VectorStore};
