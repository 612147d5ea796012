//! Contact-request workflow: moderated access to seller contact details.
//!
//! A buyer asks for a seller's contacts; a moderator approves or rejects.
//! Contact details are only revealed through an approval notification.
//! Status changes commit before any notification goes out, so a flaky
//! notifier can never roll back a decision.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::contact::ContactRequest;
use crate::domain::foundation::{ContactRequestId, DomainError, ErrorCode, OfferId, UserId};
use crate::ports::{ContactRequestRepository, ListingRepository, Notifier};

/// Drives contact requests from creation through moderation.
pub struct ContactRequestWorkflow {
    contacts: Arc<dyn ContactRequestRepository>,
    listings: Arc<dyn ListingRepository>,
    notifier: Arc<dyn Notifier>,
    moderator_id: UserId,
}

impl ContactRequestWorkflow {
    pub fn new(
        contacts: Arc<dyn ContactRequestRepository>,
        listings: Arc<dyn ListingRepository>,
        notifier: Arc<dyn Notifier>,
        moderator_id: UserId,
    ) -> Self {
        Self {
            contacts,
            listings,
            notifier,
            moderator_id,
        }
    }

    /// Files a buyer's contact request for an offer.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the offer does not exist
    /// - `DuplicatePending` if the buyer already has an unresolved request
    ///   for this offer
    /// - `StorageFailure` if a repository fails
    pub async fn create(
        &self,
        buyer_id: UserId,
        offer_id: OfferId,
        comment: Option<String>,
    ) -> Result<ContactRequest, DomainError> {
        let offer = self
            .listings
            .find_offer(offer_id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotFound, format!("Offer {} not found", offer_id))
            })?;

        if self
            .contacts
            .find_pending(&buyer_id, offer_id)
            .await
            .map_err(DomainError::from)?
            .is_some()
        {
            return Err(DomainError::new(
                ErrorCode::DuplicatePending,
                "A contact request for this offer is already awaiting moderation",
            ));
        }

        let request =
            ContactRequest::new(buyer_id, offer.seller_id().clone(), offer_id, comment);
        self.contacts.insert(&request).await.map_err(DomainError::from)?;
        debug!(request_id = %request.id(), offer_id = %offer_id, "contact request filed");

        self.notify(
            &self.moderator_id,
            &format!(
                "Contact request {} awaits review ({} head of {})",
                request.id(),
                offer.quantity(),
                offer.category()
            ),
        )
        .await;
        Ok(request)
    }

    /// Moderator approval: reveals the seller's contact to the buyer.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the request does not exist
    /// - `AlreadyResolved` if it was approved or rejected before
    /// - `StorageFailure` if a repository fails
    pub async fn approve(&self, id: ContactRequestId) -> Result<ContactRequest, DomainError> {
        let mut request = self.load(id).await?;
        request.approve()?;
        self.contacts.update(&request).await.map_err(DomainError::from)?;

        self.notify(
            request.buyer_id(),
            &format!(
                "Your contact request was approved. You can now reach seller {}.",
                request.seller_id()
            ),
        )
        .await;
        self.notify(
            request.seller_id(),
            "A buyer received your contact details and may reach out soon.",
        )
        .await;
        Ok(request)
    }

    /// Moderator rejection. The buyer learns the outcome, the seller is
    /// never bothered.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the request does not exist
    /// - `AlreadyResolved` if it was approved or rejected before
    /// - `StorageFailure` if a repository fails
    pub async fn reject(&self, id: ContactRequestId) -> Result<ContactRequest, DomainError> {
        let mut request = self.load(id).await?;
        request.reject()?;
        self.contacts.update(&request).await.map_err(DomainError::from)?;

        self.notify(
            request.buyer_id(),
            "Your contact request was declined by moderation.",
        )
        .await;
        Ok(request)
    }

    async fn load(&self, id: ContactRequestId) -> Result<ContactRequest, DomainError> {
        self.contacts
            .get(id)
            .await
            .map_err(DomainError::from)?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NotFound,
                    format!("Contact request {} not found", id),
                )
            })
    }

    async fn notify(&self, user_id: &UserId, message: &str) {
        if let Err(err) = self.notifier.notify(user_id, message).await {
            warn!(%err, "contact notification failed");
        }
    }
}
