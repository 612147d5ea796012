//! Matching engine: pairs buy-requests with compatible sell-offers.
//!
//! Matching runs when a request is published and again when an offer
//! clears moderation, so both sides of a late arrival are covered. A
//! match is created at most once per (offer, request) pair.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::listing::{BuyRequest, MatchRecord, Offer};
use crate::ports::{ListingRepository, MatchRepository, MatchRepositoryError, Notifier};

/// Pairs open buy-requests with matchable offers.
pub struct MatchingEngine {
    listings: Arc<dyn ListingRepository>,
    matches: Arc<dyn MatchRepository>,
    notifier: Arc<dyn Notifier>,
}

impl MatchingEngine {
    pub fn new(
        listings: Arc<dyn ListingRepository>,
        matches: Arc<dyn MatchRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            listings,
            matches,
            notifier,
        }
    }

    /// Matches a freshly published request against every active offer.
    ///
    /// # Errors
    ///
    /// - `InvalidEntity` if the request is not open
    /// - `StorageFailure` if a repository fails
    pub async fn on_request_finished(
        &self,
        request: &BuyRequest,
    ) -> Result<Vec<MatchRecord>, DomainError> {
        if !request.is_open() {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                "Cannot match a closed request",
            ));
        }

        let mut created = Vec::new();
        for offer in self.listings.active_offers().await.map_err(DomainError::from)? {
            if compatible(&offer, request) {
                if let Some(record) = self.record_match(&offer, request).await? {
                    created.push(record);
                }
            }
        }
        debug!(request_id = %request.id(), matches = created.len(), "request matched");
        Ok(created)
    }

    /// Matches an offer that just cleared moderation against every open
    /// request.
    ///
    /// # Errors
    ///
    /// - `InvalidEntity` if the offer is not matchable
    /// - `StorageFailure` if a repository fails
    pub async fn on_offer_approved(&self, offer: &Offer) -> Result<Vec<MatchRecord>, DomainError> {
        if !offer.is_matchable() {
            return Err(DomainError::new(
                ErrorCode::InvalidEntity,
                "Cannot match an offer that has not been approved",
            ));
        }

        let mut created = Vec::new();
        for request in self.listings.active_requests().await.map_err(DomainError::from)? {
            if compatible(offer, &request) {
                if let Some(record) = self.record_match(offer, &request).await? {
                    created.push(record);
                }
            }
        }
        debug!(offer_id = %offer.id(), matches = created.len(), "offer matched");
        Ok(created)
    }

    // Inserts the match unless the pair already has one, then notifies
    // both parties. Notification failures are logged, never propagated:
    // the match exists whether or not anyone heard about it.
    async fn record_match(
        &self,
        offer: &Offer,
        request: &BuyRequest,
    ) -> Result<Option<MatchRecord>, DomainError> {
        if self
            .matches
            .exists(offer.id(), request.id())
            .await
            .map_err(DomainError::from)?
        {
            return Ok(None);
        }

        let record = MatchRecord::new(offer.id(), request.id());
        match self.matches.insert(record.clone()).await {
            Ok(()) => {}
            // Lost a race against a concurrent match run for the same pair.
            Err(MatchRepositoryError::Duplicate { .. }) => return Ok(None),
            Err(err) => return Err(err.into()),
        }

        self.notify(
            request.buyer_id(),
            &format!(
                "New match: {} x{} in {}, {} per head",
                offer.category(),
                offer.quantity(),
                offer.region(),
                offer.price_per_head()
            ),
        )
        .await;
        self.notify(
            offer.seller_id(),
            &format!(
                "A buyer is looking for {} x{} in {}",
                request.category(),
                request.quantity(),
                request.region()
            ),
        )
        .await;

        Ok(Some(record))
    }

    async fn notify(&self, user_id: &UserId, message: &str) {
        if let Err(err) = self.notifier.notify(user_id, message).await {
            warn!(%err, "match notification failed");
        }
    }
}

/// True when an offer can satisfy a request.
///
/// Category must agree, the offer must cover the requested head count,
/// and the regions must be compatible. Price is advisory and does not
/// gate the match.
fn compatible(offer: &Offer, request: &BuyRequest) -> bool {
    offer.category().eq_ignore_ascii_case(request.category())
        && offer.quantity() >= request.quantity()
        && regions_compatible(offer.region(), request.region())
}

// An empty region means "anywhere"; otherwise a case-insensitive
// containment check either way, so "Voronezh" meets "Voronezh oblast".
fn regions_compatible(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    a.is_empty() || b.is_empty() || a.contains(&b) || b.contains(&a)
}
