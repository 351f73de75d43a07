//! Contract review repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{ContractReview, ReviewId};
use crate::domain::DomainError;

/// Read access to reviews; the report pipeline only reads
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContractReviewRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: &ReviewId) -> Result<Option<ContractReview>, DomainError>;

    async fn save(&self, review: ContractReview) -> Result<ContractReview, DomainError>;
}
