//! Structured section generation backed by a chat model

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use super::prompts::{
    DEEP_ANALYSIS_PROMPT, EXECUTIVE_SUMMARY_PROMPT, IMPROVEMENT_SUGGESTIONS_PROMPT,
    NO_REFERENCES, SYSTEM_PROMPT,
};
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::report::{SectionKind, StructuredContentGenerator};
use crate::domain::review::{
    ContractReview, DeepAnalysis, ExecutiveSummary, ImprovementSuggestions, ReviewId,
};
use crate::domain::DomainError;
use crate::infrastructure::services::{truncate_chars, StatuteRetriever};

const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_CONTENT_CHARS: usize = 12_000;
const DEFAULT_REFERENCE_COUNT: usize = 5;
const MAX_OUTPUT_TOKENS: u32 = 4000;

/// Generates report sections by prompting a chat model for JSON.
///
/// Model errors, empty replies and unparseable JSON all surface as
/// `DomainError::Generation` for the section; nothing is repaired here.
#[derive(Debug)]
pub struct LlmContentGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    retriever: Option<Arc<StatuteRetriever>>,
    temperature: f32,
    max_content_chars: usize,
    reference_count: usize,
    /// References for the most recent review, shared by its three sections
    references: Mutex<Option<(ReviewId, Arc<OnceCell<String>>)>>,
}

impl LlmContentGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            retriever: None,
            temperature: DEFAULT_TEMPERATURE,
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            reference_count: DEFAULT_REFERENCE_COUNT,
            references: Mutex::new(None),
        }
    }

    /// Ground prompts with retrieved statute articles
    pub fn with_retriever(mut self, retriever: Arc<StatuteRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Contract text beyond this many characters is left out of prompts
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    pub fn with_reference_count(mut self, reference_count: usize) -> Self {
        self.reference_count = reference_count;
        self
    }

    /// Retrieved statute text for the prompt, fetched once per review
    async fn legal_references(&self, review: &ContractReview) -> String {
        let Some(retriever) = &self.retriever else {
            return NO_REFERENCES.to_string();
        };

        let cell = {
            let mut cached = self.references.lock().await;
            match cached.as_ref() {
                Some((id, cell)) if *id == review.id() => cell.clone(),
                _ => {
                    let cell = Arc::new(OnceCell::new());
                    *cached = Some((review.id(), cell.clone()));
                    cell
                }
            }
        };

        cell.get_or_init(|| Self::retrieve_references(retriever, review, self.reference_count))
            .await
            .clone()
    }

    /// Retrieval problems only cost the references
    async fn retrieve_references(
        retriever: &StatuteRetriever,
        review: &ContractReview,
        reference_count: usize,
    ) -> String {
        match retriever.retrieve(review.content(), reference_count).await {
            Ok(hits) if !hits.is_empty() => hits
                .iter()
                .map(|hit| format!("【{}】{}", hit.metadata.filename, hit.text))
                .collect::<Vec<_>>()
                .join("\n"),
            Ok(_) => NO_REFERENCES.to_string(),
            Err(e) => {
                warn!(review_id = %review.id(), error = %e, "Statute retrieval failed, prompting without references");
                NO_REFERENCES.to_string()
            }
        }
    }

    fn build_prompt(&self, template: &str, review: &ContractReview, references: &str) -> String {
        template
            .replace("${filename}", review.filename())
            .replace("${risk_level}", review.risk_level().label())
            .replace("${total_risks}", &review.total_risks().to_string())
            .replace("${legal_references}", references)
            .replace(
                "${contract_content}",
                truncate_chars(review.content(), self.max_content_chars),
            )
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        section: SectionKind,
        template: &str,
        review: &ContractReview,
    ) -> Result<T, DomainError> {
        let references = self.legal_references(review).await;
        let prompt = self.build_prompt(template, review, &references);

        let request = LlmRequest::builder()
            .system(SYSTEM_PROMPT)
            .user(prompt)
            .temperature(self.temperature)
            .max_tokens(MAX_OUTPUT_TOKENS)
            .json_output()
            .build();

        debug!(section = %section, model = %self.model, "Requesting section from model");

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| DomainError::generation(section.as_str(), format!("Model call failed: {}", e)))?;

        if response.is_truncated() {
            debug!(section = %section, "Model output hit the token limit");
        }

        parse_section(section, response.content())
    }
}

/// Parse a model reply into a section, tolerating prose or code fences
/// around the JSON object
fn parse_section<T: DeserializeOwned>(section: SectionKind, content: &str) -> Result<T, DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::generation(section.as_str(), "Empty response from model"));
    }

    let json_str = extract_json(content).unwrap_or(content);

    serde_json::from_str(json_str).map_err(|e| {
        warn!(section = %section, "Failed to parse model response: {}", e);
        DomainError::generation(section.as_str(), format!("Invalid JSON: {}", e))
    })
}

/// Extract JSON object from a string (handles markdown code blocks)
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;

    (start < end).then(|| &text[start..=end])
}

#[async_trait]
impl StructuredContentGenerator for LlmContentGenerator {
    async fn generate_executive_summary(
        &self,
        review: &ContractReview,
    ) -> Result<ExecutiveSummary, DomainError> {
        self.generate(SectionKind::ExecutiveSummary, EXECUTIVE_SUMMARY_PROMPT, review)
            .await
    }

    async fn generate_deep_analysis(
        &self,
        review: &ContractReview,
    ) -> Result<DeepAnalysis, DomainError> {
        self.generate(SectionKind::DeepAnalysis, DEEP_ANALYSIS_PROMPT, review)
            .await
    }

    async fn generate_improvement_suggestions(
        &self,
        review: &ContractReview,
    ) -> Result<ImprovementSuggestions, DomainError> {
        self.generate(
            SectionKind::ImprovementSuggestions,
            IMPROVEMENT_SUGGESTIONS_PROMPT,
            review,
        )
        .await
    }
}
