//! In-memory notifier recording every outbound message.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{Notifier, NotifyError};

/// Notifier that records messages instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<RwLock<Vec<(UserId, String)>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `notify` fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All recorded messages, in send order.
    pub async fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.read().await.clone()
    }

    /// Messages delivered to one user.
    pub async fn sent_to(&self, user_id: &UserId) -> Vec<String> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|(recipient, _)| recipient == user_id)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, user_id: &UserId, message: &str) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery {
                user_id: user_id.clone(),
                reason: "notifier marked unavailable".to_string(),
            });
        }
        self.sent
            .write()
            .await
            .push((user_id.clone(), message.to_string()));
        Ok(())
    }
}
