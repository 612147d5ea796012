//! Session lifecycle configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session TTL and sweeper settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds a session may sit idle before eviction
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Seconds between background sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs < 60 {
            return Err(ValidationError::SessionTtlTooShort);
        }
        if self.sweep_interval_secs == 0 {
            return Err(ValidationError::SweepIntervalTooShort);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    1800
}

fn default_sweep_interval_secs() -> u64 {
    300
}
