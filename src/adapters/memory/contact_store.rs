//! In-memory contact-request storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::contact::ContactRequest;
use crate::domain::foundation::{ContactRequestId, OfferId, UserId};
use crate::ports::{ContactRepositoryError, ContactRequestRepository};

/// In-memory storage for contact requests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactStore {
    requests: Arc<RwLock<HashMap<ContactRequestId, ContactRequest>>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl ContactRequestRepository for InMemoryContactStore {
    async fn find_pending(
        &self,
        buyer_id: &UserId,
        offer_id: OfferId,
    ) -> Result<Option<ContactRequest>, ContactRepositoryError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .find(|request| {
                request.is_pending()
                    && request.buyer_id() == buyer_id
                    && request.offer_id() == offer_id
            })
            .cloned())
    }

    async fn insert(&self, request: &ContactRequest) -> Result<(), ContactRepositoryError> {
        self.requests
            .write()
            .await
            .insert(request.id(), request.clone());
        Ok(())
    }

    async fn get(
        &self,
        id: ContactRequestId,
    ) -> Result<Option<ContactRequest>, ContactRepositoryError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn update(&self, request: &ContactRequest) -> Result<(), ContactRepositoryError> {
        self.requests
            .write()
            .await
            .insert(request.id(), request.clone());
        Ok(())
    }
}
