//! ListingRepository port - access to offers and buy-requests.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, OfferId, RequestId};
use crate::domain::listing::{BuyRequest, Offer};

/// Errors that can occur during listing storage operations.
#[derive(Debug, thiserror::Error)]
pub enum ListingRepositoryError {
    #[error("Listing storage failed: {0}")]
    Storage(String),
}

impl From<ListingRepositoryError> for DomainError {
    fn from(err: ListingRepositoryError) -> Self {
        DomainError::new(ErrorCode::StorageFailure, err.to_string())
    }
}

/// Port for reading and writing listings.
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn save_offer(&self, offer: &Offer) -> Result<(), ListingRepositoryError>;

    async fn save_request(&self, request: &BuyRequest) -> Result<(), ListingRepositoryError>;

    async fn find_offer(&self, id: OfferId) -> Result<Option<Offer>, ListingRepositoryError>;

    async fn find_request(&self, id: RequestId)
        -> Result<Option<BuyRequest>, ListingRepositoryError>;

    /// Matchable offers, most recent first ("fresh inventory first").
    async fn active_offers(&self) -> Result<Vec<Offer>, ListingRepositoryError>;

    /// Open buy-requests, most recent first.
    async fn active_requests(&self) -> Result<Vec<BuyRequest>, ListingRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ListingRepository) {}

    #[test]
    fn storage_error_maps_to_storage_failure() {
        let err: DomainError = ListingRepositoryError::Storage("down".to_string()).into();
        assert_eq!(err.code, ErrorCode::StorageFailure);
    }
}
