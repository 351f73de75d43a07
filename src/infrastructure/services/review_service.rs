//! Review service - registers reviews and produces their reports

use std::sync::Arc;

use tracing::info;

use crate::domain::report::ReportSink;
use crate::domain::review::{ContractReview, ContractReviewRepository, ReviewId};
use crate::domain::DomainError;
use crate::infrastructure::report::{ComposedReport, ReportComposer};

/// A composed report and where it was written
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub report: ComposedReport,
    pub location: String,
}

#[derive(Debug)]
pub struct ReviewService {
    reviews: Arc<dyn ContractReviewRepository>,
    composer: Arc<ReportComposer>,
    sink: Arc<dyn ReportSink>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ContractReviewRepository>,
        composer: Arc<ReportComposer>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            reviews,
            composer,
            sink,
        }
    }

    pub async fn register(&self, review: ContractReview) -> Result<ContractReview, DomainError> {
        self.reviews.save(review).await
    }

    /// Get a review by ID, returning an error if not found
    pub async fn get_required(&self, id: &ReviewId) -> Result<ContractReview, DomainError> {
        self.reviews
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Review '{}' not found", id)))
    }

    /// Compose the report for a stored review. Only lookup can fail.
    pub async fn generate_report(&self, id: &ReviewId) -> Result<ComposedReport, DomainError> {
        let review = self.get_required(id).await?;
        Ok(self.composer.compose(&review).await)
    }

    /// Compose the report and write it through the sink
    pub async fn export_report(&self, id: &ReviewId) -> Result<ExportedReport, DomainError> {
        let review = self.get_required(id).await?;
        let report = self.composer.compose(&review).await;
        let location = self.sink.write(&review, &report.text).await?;

        info!(
            review_id = %id,
            location = %location,
            fallback_sections = report.fallback_count(),
            "Report exported"
        );

        Ok(ExportedReport { report, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{ContentValidator, ScriptedContentGenerator};
    use crate::domain::review::{MockContractReviewRepository, RiskLevel};
    use crate::infrastructure::report::MarkdownFileSink;
    use crate::infrastructure::review::InMemoryContractReviewRepository;
    use tokio_test::{assert_err, assert_ok};

    fn composer() -> Arc<ReportComposer> {
        Arc::new(ReportComposer::new(
            Arc::new(ScriptedContentGenerator::failing()),
            Arc::new(ContentValidator::new()),
        ))
    }

    fn service(reviews: Arc<dyn ContractReviewRepository>, output: &std::path::Path) -> ReviewService {
        ReviewService::new(reviews, composer(), Arc::new(MarkdownFileSink::new(output)))
    }

    #[tokio::test]
    async fn test_generate_report_for_stored_review() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(InMemoryContractReviewRepository::new()), dir.path());
        let review = service
            .register(ContractReview::new("租赁合同.docx", "出租方：", RiskLevel::High, 7))
            .await
            .unwrap();

        let report = assert_ok!(service.generate_report(&review.id()).await);

        assert_eq!(report.review_id, review.id());
        assert_eq!(report.fallback_count(), 3);
        assert!(report.text.contains("租赁合同.docx"));
    }

    #[tokio::test]
    async fn test_unknown_review_is_not_found() {
        let mut reviews = MockContractReviewRepository::new();
        reviews.expect_get().times(1).returning(|_| Ok(None));

        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(reviews), dir.path());

        let err = assert_err!(service.generate_report(&ReviewId::new()).await);
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_export_writes_through_sink() {
        let review = ContractReview::new("服务协议.pdf", "甲方：乙方：", RiskLevel::Low, 0);
        let stored = review.clone();

        let mut reviews = MockContractReviewRepository::new();
        reviews
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));

        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(reviews), dir.path());

        let exported = assert_ok!(service.export_report(&review.id()).await);

        let written = tokio::fs::read_to_string(&exported.location).await.unwrap();
        assert_eq!(written, exported.report.text);
        assert!(exported.location.contains("服务协议_review_"));
    }
}
