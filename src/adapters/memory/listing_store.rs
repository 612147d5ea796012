//! In-memory listing storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{OfferId, RequestId};
use crate::domain::listing::{BuyRequest, Offer};
use crate::ports::{ListingRepository, ListingRepositoryError};

/// In-memory storage for offers and buy-requests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingStore {
    offers: Arc<RwLock<HashMap<OfferId, Offer>>>,
    requests: Arc<RwLock<HashMap<RequestId, BuyRequest>>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingStore {
    async fn save_offer(&self, offer: &Offer) -> Result<(), ListingRepositoryError> {
        self.offers.write().await.insert(offer.id(), offer.clone());
        Ok(())
    }

    async fn save_request(&self, request: &BuyRequest) -> Result<(), ListingRepositoryError> {
        self.requests
            .write()
            .await
            .insert(request.id(), request.clone());
        Ok(())
    }

    async fn find_offer(&self, id: OfferId) -> Result<Option<Offer>, ListingRepositoryError> {
        Ok(self.offers.read().await.get(&id).cloned())
    }

    async fn find_request(
        &self,
        id: RequestId,
    ) -> Result<Option<BuyRequest>, ListingRepositoryError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn active_offers(&self) -> Result<Vec<Offer>, ListingRepositoryError> {
        let mut offers: Vec<Offer> = self
            .offers
            .read()
            .await
            .values()
            .filter(|offer| offer.is_matchable())
            .cloned()
            .collect();
        offers.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(offers)
    }

    async fn active_requests(&self) -> Result<Vec<BuyRequest>, ListingRepositoryError> {
        let mut requests: Vec<BuyRequest> = self
            .requests
            .read()
            .await
            .values()
            .filter(|request| request.is_open())
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn offer(seller: &str) -> Offer {
        Offer::new(
            OfferId::new(),
            UserId::new(seller).unwrap(),
            "cattle".to_string(),
            "hereford".to_string(),
            "Voronezh".to_string(),
            10,
            120_000,
        )
        .unwrap()
    }

    fn request(buyer: &str) -> BuyRequest {
        BuyRequest::new(
            RequestId::new(),
            UserId::new(buyer).unwrap(),
            "cattle".to_string(),
            "Voronezh".to_string(),
            5,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find_offer() {
        let store = InMemoryListingStore::new();
        let offer = offer("seller-1");

        store.save_offer(&offer).await.unwrap();
        assert_eq!(store.find_offer(offer.id()).await.unwrap(), Some(offer));
    }

    #[tokio::test]
    async fn pending_offers_are_not_active() {
        let store = InMemoryListingStore::new();
        store.save_offer(&offer("seller-1")).await.unwrap();

        assert!(store.active_offers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_offer_overwrites_by_id() {
        let store = InMemoryListingStore::new();
        let mut offer = offer("seller-1");
        store.save_offer(&offer).await.unwrap();

        offer.approve().unwrap();
        store.save_offer(&offer).await.unwrap();

        let active = store.active_offers().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), offer.id());
    }

    #[tokio::test]
    async fn active_requests_come_most_recent_first() {
        let store = InMemoryListingStore::new();
        let older = request("buyer-1");
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
        let newer = request("buyer-2");

        store.save_request(&older).await.unwrap();
        store.save_request(&newer).await.unwrap();

        let active = store.active_requests().await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id(), newer.id());
        assert_eq!(active[1].id(), older.id());
    }

    #[tokio::test]
    async fn find_request_of_absent_id_is_none() {
        let store = InMemoryListingStore::new();
        assert!(store.find_request(RequestId::new()).await.unwrap().is_none());
    }
}
