//! In-memory record sink.
//!
//! Collects finished records for tests and local runs. Can be switched
//! into a failing mode to exercise the retry-on-storage-failure path.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialog::FinishedRecord;
use crate::domain::foundation::RecordId;
use crate::ports::{RecordSink, RecordSinkError};

/// In-memory storage for finished records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordSink {
    records: Arc<RwLock<Vec<(RecordId, FinishedRecord)>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All records saved so far, in save order.
    pub async fn saved(&self) -> Vec<(RecordId, FinishedRecord)> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordSink for InMemoryRecordSink {
    async fn save(&self, record: &FinishedRecord) -> Result<RecordId, RecordSinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RecordSinkError::Unavailable(
                "record sink marked unavailable".to_string(),
            ));
        }
        let id = RecordId::new();
        self.records.write().await.push((id, record.clone()));
        Ok(id)
    }
}
