//! SessionStore port - keyed storage of in-flight dialog sessions.
//!
//! One entry per (user, dialog kind). Implementations must linearize
//! updates for a given key; the advisory lock exposed by `try_acquire`
//! is how the engine serializes same-user events without a global lock.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::dialog::{DialogSession, SessionKey};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// Another event for the same session is in flight.
    #[error("Session {0:?} is busy")]
    Busy(SessionKey),

    #[error("Session storage failed: {0}")]
    Storage(String),
}

impl From<SessionStoreError> for DomainError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::Busy(_) => {
                DomainError::new(ErrorCode::SessionBusy, err.to_string())
            }
            SessionStoreError::Storage(_) => {
                DomainError::new(ErrorCode::StorageFailure, err.to_string())
            }
        }
    }
}

/// Advisory lock on one session key, released on drop.
///
/// Holding the guard guarantees no other event for the same key mutates
/// the session concurrently. The guard is tied to the key's mutex, not to
/// the session value, so it also covers creation and deletion.
#[derive(Debug)]
pub struct SessionGuard {
    _guard: OwnedMutexGuard<()>,
}

impl SessionGuard {
    pub fn from_owned_guard(guard: OwnedMutexGuard<()>) -> Self {
        Self { _guard: guard }
    }
}

/// Port for storing in-flight dialog sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for a key, if one is live.
    ///
    /// Implementations may lazily evict an entry whose idle time exceeds
    /// the TTL and report it as absent.
    async fn get(&self, key: &SessionKey) -> Result<Option<DialogSession>, SessionStoreError>;

    /// Stores a session, replacing any existing entry for its key.
    async fn put(&self, session: DialogSession) -> Result<(), SessionStoreError>;

    /// Deletes the session for a key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError>;

    /// Removes every session idle strictly longer than the TTL as of
    /// `now`, returning how many were evicted.
    async fn sweep_expired(&self, now: Timestamp) -> Result<usize, SessionStoreError>;

    /// Acquires the per-key advisory lock without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Busy`] if another holder has the key.
    async fn try_acquire(&self, key: &SessionKey) -> Result<SessionGuard, SessionStoreError>;
}
