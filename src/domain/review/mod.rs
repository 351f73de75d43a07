//! Contract review domain - review metadata and structured report sections

mod entity;
mod repository;
mod sections;

pub use entity::{ContractReview, ReviewId, RiskLevel};
pub use repository::ContractReviewRepository;
pub use sections::{
    ClauseAnalysis, DeepAnalysis, ExecutiveSummary, ImprovementSuggestion,
    ImprovementSuggestions, LegalNature, RiskPoint,
};

#[cfg(test)]
pub use repository::MockContractReviewRepository;
