//! Structured content generator trait

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::review::{
    ContractReview, DeepAnalysis, ExecutiveSummary, ImprovementSuggestions,
};
use crate::domain::DomainError;

/// Produces each report section from a generative model.
///
/// Implementations surface every model or parse failure as an error and
/// apply no fallback of their own.
#[async_trait]
pub trait StructuredContentGenerator: Send + Sync + Debug {
    async fn generate_executive_summary(
        &self,
        review: &ContractReview,
    ) -> Result<ExecutiveSummary, DomainError>;

    async fn generate_deep_analysis(
        &self,
        review: &ContractReview,
    ) -> Result<DeepAnalysis, DomainError>;

    async fn generate_improvement_suggestions(
        &self,
        review: &ContractReview,
    ) -> Result<ImprovementSuggestions, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Behaviour of one scripted section
    #[derive(Debug, Clone)]
    pub enum SectionScript<T> {
        Return(T),
        Fail,
        /// Sleep, then return the value
        Hang(Duration, T),
    }

    impl<T: Clone> SectionScript<T> {
        async fn run(&self, section: &str) -> Result<T, DomainError> {
            match self {
                Self::Return(value) => Ok(value.clone()),
                Self::Fail => Err(DomainError::generation(section, "scripted failure")),
                Self::Hang(delay, value) => {
                    tokio::time::sleep(*delay).await;
                    Ok(value.clone())
                }
            }
        }
    }

    #[derive(Debug)]
    pub struct ScriptedContentGenerator {
        pub executive_summary: SectionScript<ExecutiveSummary>,
        pub deep_analysis: SectionScript<DeepAnalysis>,
        pub improvements: SectionScript<ImprovementSuggestions>,
        calls: AtomicUsize,
    }

    impl ScriptedContentGenerator {
        pub fn new(
            executive_summary: SectionScript<ExecutiveSummary>,
            deep_analysis: SectionScript<DeepAnalysis>,
            improvements: SectionScript<ImprovementSuggestions>,
        ) -> Self {
            Self {
                executive_summary,
                deep_analysis,
                improvements,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self::new(SectionScript::Fail, SectionScript::Fail, SectionScript::Fail)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StructuredContentGenerator for ScriptedContentGenerator {
        async fn generate_executive_summary(
            &self,
            _review: &ContractReview,
        ) -> Result<ExecutiveSummary, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.executive_summary.run("executive_summary").await
        }

        async fn generate_deep_analysis(
            &self,
            _review: &ContractReview,
        ) -> Result<DeepAnalysis, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.deep_analysis.run("deep_analysis").await
        }

        async fn generate_improvement_suggestions(
            &self,
            _review: &ContractReview,
        ) -> Result<ImprovementSuggestions, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.improvements.run("improvement_suggestions").await
        }
    }
}
