//! Notifier port - outbound user notifications.
//!
//! Delivery is at-least-once and best-effort: workflow state is
//! authoritative even when a notification fails, so callers log failures
//! and never roll back.

use async_trait::async_trait;

use crate::domain::foundation::UserId;

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Delivery to {user_id} failed: {reason}")]
    Delivery { user_id: UserId, reason: String },
}

/// Port for delivering messages to users (chat or email, transport's
/// choice).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &UserId, message: &str) -> Result<(), NotifyError>;
}
