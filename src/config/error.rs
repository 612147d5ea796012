//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Session TTL must be at least 60 seconds")]
    SessionTtlTooShort,

    #[error("Sweep interval must be at least 1 second")]
    SweepIntervalTooShort,

    #[error("Moderator id must not be empty")]
    EmptyModeratorId,
}
