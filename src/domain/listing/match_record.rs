//! A pairing between a buy-request and a sell-offer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, MatchId, MatchStatus, OfferId, RequestId, StateMachine, Timestamp,
};

/// A match between an offer and a buy-request.
///
/// At most one match ever exists per (offer, request) pair; the matching
/// engine checks the repository before creating one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    id: MatchId,
    offer_id: OfferId,
    request_id: RequestId,
    status: MatchStatus,
    created_at: Timestamp,
}

impl MatchRecord {
    /// Creates a new pending match.
    pub fn new(offer_id: OfferId, request_id: RequestId) -> Self {
        Self {
            id: MatchId::new(),
            offer_id,
            request_id,
            status: MatchStatus::Pending,
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> MatchId {
        self.id
    }

    pub fn offer_id(&self) -> OfferId {
        self.offer_id
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(MatchStatus::Approved)?;
        Ok(())
    }

    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(MatchStatus::Rejected)?;
        Ok(())
    }
}
