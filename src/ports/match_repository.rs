//! MatchRepository port - storage for offer/request matches.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, OfferId, RequestId};
use crate::domain::listing::MatchRecord;

/// Errors that can occur during match storage operations.
#[derive(Debug, thiserror::Error)]
pub enum MatchRepositoryError {
    /// A match for this (offer, request) pair already exists.
    #[error("Match already exists for offer {offer_id} and request {request_id}")]
    Duplicate {
        offer_id: OfferId,
        request_id: RequestId,
    },

    #[error("Match storage failed: {0}")]
    Storage(String),
}

impl From<MatchRepositoryError> for DomainError {
    fn from(err: MatchRepositoryError) -> Self {
        match err {
            MatchRepositoryError::Duplicate { .. } => {
                DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
            }
            MatchRepositoryError::Storage(_) => {
                DomainError::new(ErrorCode::StorageFailure, err.to_string())
            }
        }
    }
}

/// Port for storing matches.
///
/// Implementations enforce at-most-one match per (offer, request) pair;
/// `insert` fails with [`MatchRepositoryError::Duplicate`] on a repeat.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn exists(
        &self,
        offer_id: OfferId,
        request_id: RequestId,
    ) -> Result<bool, MatchRepositoryError>;

    async fn insert(&self, record: MatchRecord) -> Result<(), MatchRepositoryError>;

    async fn for_request(&self, request_id: RequestId)
        -> Result<Vec<MatchRecord>, MatchRepositoryError>;

    async fn for_offer(&self, offer_id: OfferId) -> Result<Vec<MatchRecord>, MatchRepositoryError>;
}
