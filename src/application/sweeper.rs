//! Background eviction of idle sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Periodically sweeps expired sessions out of the store.
///
/// Runs on a fixed interval independent of traffic; lazy eviction in the
/// store covers sessions touched between sweeps.
pub struct SessionSweeper {
    store: Arc<dyn SessionStore>,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, interval_secs: u64) -> Self {
        Self {
            store,
            interval: Duration::from_secs(interval_secs),
        }
    }

    /// Spawns the sweep loop. Aborting the handle stops it.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick fires immediately; skip it so a fresh boot
            // does not sweep before anything can be idle.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match self.store.sweep_expired(Timestamp::now()).await {
                    Ok(0) => {}
                    Ok(evicted) => debug!(evicted, "swept idle sessions"),
                    Err(err) => warn!(%err, "session sweep failed"),
                }
            }
        })
    }
}
