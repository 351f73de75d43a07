//! Report composition: resolve every section, then render

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::domain::report::{
    ContentValidation, FallbackContent, ResolvedSection, ResolvedSections, SectionKind,
    SectionLifecycle, SectionSource, StructuredContentGenerator, TemplateRenderer,
};
use crate::domain::review::{ContractReview, ReviewId};
use crate::domain::DomainError;

const DEFAULT_SECTION_TIMEOUT: Duration = Duration::from_secs(60);

/// A rendered report together with how each section was resolved
#[derive(Debug, Clone)]
pub struct ComposedReport {
    pub review_id: ReviewId,
    pub text: String,
    pub sections: ResolvedSections,
    pub generated_at: DateTime<Utc>,
}

impl ComposedReport {
    pub fn sources(&self) -> [(SectionKind, SectionSource); 3] {
        self.sections.sources()
    }

    pub fn fallback_count(&self) -> usize {
        self.sections.fallback_count()
    }
}

/// Resolves the three sections independently and renders the report.
///
/// Each section is generated under its own timeout. A failed, timed out or
/// invalid section is replaced by its rule-based fallback without affecting
/// the others, so composition itself never fails.
#[derive(Debug)]
pub struct ReportComposer {
    generator: Arc<dyn StructuredContentGenerator>,
    validator: Arc<dyn ContentValidation>,
    renderer: TemplateRenderer,
    section_timeout: Duration,
}

impl ReportComposer {
    pub fn new(
        generator: Arc<dyn StructuredContentGenerator>,
        validator: Arc<dyn ContentValidation>,
    ) -> Self {
        Self {
            generator,
            validator,
            renderer: TemplateRenderer::new(),
            section_timeout: DEFAULT_SECTION_TIMEOUT,
        }
    }

    pub fn with_section_timeout(mut self, timeout: Duration) -> Self {
        self.section_timeout = timeout;
        self
    }

    pub fn section_timeout(&self) -> Duration {
        self.section_timeout
    }

    /// Resolve all three sections concurrently
    pub async fn resolve_sections(&self, review: &ContractReview) -> ResolvedSections {
        let (executive_summary, deep_analysis, improvements) = tokio::join!(
            self.resolve(
                SectionKind::ExecutiveSummary,
                review,
                self.generator.generate_executive_summary(review),
                |summary| self.validator.is_valid_executive_summary(summary),
                FallbackContent::executive_summary,
            ),
            self.resolve(
                SectionKind::DeepAnalysis,
                review,
                self.generator.generate_deep_analysis(review),
                |analysis| self.validator.is_valid_deep_analysis(analysis),
                FallbackContent::deep_analysis,
            ),
            self.resolve(
                SectionKind::ImprovementSuggestions,
                review,
                self.generator.generate_improvement_suggestions(review),
                |suggestions| self.validator.is_valid_improvement_suggestions(suggestions),
                FallbackContent::improvement_suggestions,
            ),
        );

        ResolvedSections {
            executive_summary,
            deep_analysis,
            improvements,
        }
    }

    pub async fn compose(&self, review: &ContractReview) -> ComposedReport {
        let sections = self.resolve_sections(review).await;
        let generated_at = Utc::now();
        let text = self.renderer.render(review, &sections, generated_at);

        info!(
            review_id = %review.id(),
            fallback_sections = sections.fallback_count(),
            "Report composed"
        );

        ComposedReport {
            review_id: review.id(),
            text,
            sections,
            generated_at,
        }
    }

    /// Compose and return only the report text
    pub async fn generate_markdown_report(&self, review: &ContractReview) -> String {
        self.compose(review).await.text
    }

    async fn resolve<T, G, V>(
        &self,
        kind: SectionKind,
        review: &ContractReview,
        generation: G,
        is_valid: V,
        fallback: fn(&ContractReview) -> T,
    ) -> ResolvedSection<T>
    where
        G: Future<Output = Result<T, DomainError>>,
        V: Fn(&T) -> bool,
    {
        let span = info_span!("section", section = %kind, review_id = %review.id());

        async move {
            let lifecycle = SectionLifecycle::start(kind).generating();

            let outcome = match tokio::time::timeout(self.section_timeout, generation).await {
                Ok(result) => result,
                Err(_) => Err(DomainError::timeout(
                    kind.as_str(),
                    self.section_timeout.as_millis() as u64,
                )),
            };

            match outcome {
                Ok(value) if is_valid(&value) => {
                    debug!("Generated section accepted");
                    lifecycle.accept(value)
                }
                Ok(_) => {
                    warn!("Generated section is incomplete, using fallback");
                    lifecycle.reject("generated content failed validation", fallback(review))
                }
                Err(e) => {
                    warn!(error = %e, "Section generation failed, using fallback");
                    lifecycle.reject(e.to_string(), fallback(review))
                }
            }
        }
        .instrument(span)
        .await
    }
}
