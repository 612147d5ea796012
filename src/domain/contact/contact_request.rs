//! Contact-request entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContactRequestId, ContactRequestStatus, DomainError, ErrorCode, OfferId, StateMachine,
    Timestamp, UserId,
};

/// A buyer's pending ask to receive a seller's contact details.
///
/// Created by a buyer action, mutated only by a moderator action.
/// Terminal states are immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    id: ContactRequestId,
    buyer_id: UserId,
    seller_id: UserId,
    offer_id: OfferId,
    comment: Option<String>,
    status: ContactRequestStatus,
    created_at: Timestamp,
    resolved_at: Option<Timestamp>,
}

impl ContactRequest {
    /// Creates a new pending contact request.
    pub fn new(
        buyer_id: UserId,
        seller_id: UserId,
        offer_id: OfferId,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: ContactRequestId::new(),
            buyer_id,
            seller_id,
            offer_id,
            comment,
            status: ContactRequestStatus::Pending,
            created_at: Timestamp::now(),
            resolved_at: None,
        }
    }

    pub fn id(&self) -> ContactRequestId {
        self.id
    }

    pub fn buyer_id(&self) -> &UserId {
        &self.buyer_id
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn offer_id(&self) -> OfferId {
        self.offer_id
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn status(&self) -> ContactRequestStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn resolved_at(&self) -> Option<&Timestamp> {
        self.resolved_at.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == ContactRequestStatus::Pending
    }

    /// Moderator approval: reveal seller contact to the buyer.
    ///
    /// # Errors
    ///
    /// - `AlreadyResolved` if the request is no longer pending
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.resolve(ContactRequestStatus::Approved)
    }

    /// Moderator rejection.
    ///
    /// # Errors
    ///
    /// - `AlreadyResolved` if the request is no longer pending
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.resolve(ContactRequestStatus::Rejected)
    }

    fn resolve(&mut self, target: ContactRequestStatus) -> Result<(), DomainError> {
        if self.status.is_resolved() {
            return Err(DomainError::new(
                ErrorCode::AlreadyResolved,
                format!("Contact request is already {}", self.status),
            ));
        }
        self.status = self.status.transition_to(target)?;
        self.resolved_at = Some(Timestamp::now());
        Ok(())
    }
}
