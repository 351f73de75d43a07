//! Report output sink

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::review::ContractReview;
use crate::domain::DomainError;

/// Destination for rendered report text (markdown file, PDF renderer, ...)
#[async_trait]
pub trait ReportSink: Send + Sync + Debug {
    /// Persist the report and return where it was written
    async fn write(&self, review: &ContractReview, report: &str) -> Result<String, DomainError>;
}
