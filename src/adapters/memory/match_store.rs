//! In-memory match storage enforcing pair uniqueness.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{OfferId, RequestId};
use crate::domain::listing::MatchRecord;
use crate::ports::{MatchRepository, MatchRepositoryError};

/// In-memory storage for matches, keyed by (offer, request).
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<RwLock<HashMap<(OfferId, RequestId), MatchRecord>>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.matches.read().await.len()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchStore {
    async fn exists(
        &self,
        offer_id: OfferId,
        request_id: RequestId,
    ) -> Result<bool, MatchRepositoryError> {
        Ok(self
            .matches
            .read()
            .await
            .contains_key(&(offer_id, request_id)))
    }

    async fn insert(&self, record: MatchRecord) -> Result<(), MatchRepositoryError> {
        let key = (record.offer_id(), record.request_id());
        let mut matches = self.matches.write().await;
        if matches.contains_key(&key) {
            return Err(MatchRepositoryError::Duplicate {
                offer_id: key.0,
                request_id: key.1,
            });
        }
        matches.insert(key, record);
        Ok(())
    }

    async fn for_request(
        &self,
        request_id: RequestId,
    ) -> Result<Vec<MatchRecord>, MatchRepositoryError> {
        let mut found: Vec<MatchRecord> = self
            .matches
            .read()
            .await
            .values()
            .filter(|record| record.request_id() == request_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(found)
    }

    async fn for_offer(&self, offer_id: OfferId) -> Result<Vec<MatchRecord>, MatchRepositoryError> {
        let mut found: Vec<MatchRecord> = self
            .matches
            .read()
            .await
            .values()
            .filter(|record| record.offer_id() == offer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(found)
    }
}
