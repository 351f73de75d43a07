//! In-memory contract review repository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::review::{ContractReview, ContractReviewRepository, ReviewId};
use crate::domain::DomainError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryContractReviewRepository {
    reviews: Arc<RwLock<HashMap<ReviewId, ContractReview>>>,
}

impl InMemoryContractReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractReviewRepository for InMemoryContractReviewRepository {
    async fn get(&self, id: &ReviewId) -> Result<Option<ContractReview>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(id).cloned())
    }

    async fn save(&self, review: ContractReview) -> Result<ContractReview, DomainError> {
        let mut reviews = self.reviews.write().await;
        reviews.insert(review.id(), review.clone());
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::RiskLevel;

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryContractReviewRepository::new();
        let review = ContractReview::new("采购合同.docx", "甲方：", RiskLevel::High, 5);
        let id = review.id();

        repo.save(review).await.unwrap();

        let found = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(found.total_risks(), 5);
        assert!(repo.get(&ReviewId::new()).await.unwrap().is_none());
    }
}
