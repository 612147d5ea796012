//! ContactRequestRepository port - storage for contact requests.

use async_trait::async_trait;

use crate::domain::contact::ContactRequest;
use crate::domain::foundation::{ContactRequestId, DomainError, ErrorCode, OfferId, UserId};

/// Errors that can occur during contact-request storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ContactRepositoryError {
    #[error("Contact request storage failed: {0}")]
    Storage(String),
}

impl From<ContactRepositoryError> for DomainError {
    fn from(err: ContactRepositoryError) -> Self {
        DomainError::new(ErrorCode::StorageFailure, err.to_string())
    }
}

/// Port for storing contact requests.
#[async_trait]
pub trait ContactRequestRepository: Send + Sync {
    /// The unresolved request for a (buyer, offer) pair, if any.
    async fn find_pending(
        &self,
        buyer_id: &UserId,
        offer_id: OfferId,
    ) -> Result<Option<ContactRequest>, ContactRepositoryError>;

    async fn insert(&self, request: &ContactRequest) -> Result<(), ContactRepositoryError>;

    async fn get(
        &self,
        id: ContactRequestId,
    ) -> Result<Option<ContactRequest>, ContactRepositoryError>;

    /// Persists a status change made by the workflow.
    async fn update(&self, request: &ContactRequest) -> Result<(), ContactRepositoryError>;
}
