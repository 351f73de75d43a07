//! Infrastructure services

mod retrieval_service;
mod review_service;

pub(crate) use retrieval_service::truncate_chars;
pub use retrieval_service::StatuteRetriever;
pub use review_service::{ExportedReport, ReviewService};
