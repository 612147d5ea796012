//! In-memory session store.
//!
//! Holds in-flight dialog sessions in a process-local map. Sessions are
//! ephemeral by design (a crash loses unfinished dialogs, never finished
//! records), so this adapter is the production store, not just a test
//! double.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::{Mutex, RwLock};

use crate::domain::dialog::{DialogSession, SessionKey};
use crate::domain::foundation::Timestamp;
use crate::ports::{SessionGuard, SessionStore, SessionStoreError};

/// In-memory keyed session storage with per-key advisory locks.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    ttl_secs: u64,
    sessions: Arc<RwLock<HashMap<SessionKey, DialogSession>>>,
    // Advisory locks outlive their sessions so creation and deletion are
    // covered too. Guarded by a std mutex; never held across await.
    locks: Arc<StdMutex<HashMap<SessionKey, Arc<Mutex<()>>>>>,
}

impl InMemorySessionStore {
    /// Creates a store evicting sessions idle strictly longer than
    /// `ttl_secs`.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    /// Number of live sessions (useful for tests and the sweeper log).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn key_lock(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(key.clone()).or_default().clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &SessionKey) -> Result<Option<DialogSession>, SessionStoreError> {
        let expired = {
            let sessions = self.sessions.read().await;
            match sessions.get(key) {
                Some(session) => session.is_idle(&Timestamp::now(), self.ttl_secs),
                None => return Ok(None),
            }
        };

        if expired {
            // Lazy expiry on access; re-check under the write lock in case
            // the session was touched in between.
            let mut sessions = self.sessions.write().await;
            let now = Timestamp::now();
            if sessions
                .get(key)
                .is_some_and(|session| session.is_idle(&now, self.ttl_secs))
            {
                sessions.remove(key);
            }
            return Ok(sessions.get(key).cloned());
        }

        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn put(&self, session: DialogSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.key().clone(), session);
        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);
        Ok(())
    }

    async fn sweep_expired(&self, now: Timestamp) -> Result<usize, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(&now, self.ttl_secs));

        // Drop lock entries for keys with no live session, unless a guard
        // still holds the Arc (strong_count > 1 while an OwnedMutexGuard
        // is out). Keeps the lock map from growing one entry per key
        // ever seen.
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.retain(|key, lock| sessions.contains_key(key) || Arc::strong_count(lock) > 1);

        Ok(before - sessions.len())
    }

    async fn try_acquire(&self, key: &SessionKey) -> Result<SessionGuard, SessionStoreError> {
        let lock = self.key_lock(key);
        match lock.try_lock_owned() {
            Ok(guard) => Ok(SessionGuard::from_owned_guard(guard)),
            Err(_) => Err(SessionStoreError::Busy(key.clone())),
        }
    }
}
