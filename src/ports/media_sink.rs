//! MediaSink port - opaque storage for uploaded photos and videos.
//!
//! The transport uploads bytes before the media field is validated; the
//! dialog core only ever sees the resolved (url, key) pair.

use async_trait::async_trait;

use crate::domain::dialog::MediaRef;

/// Errors that can occur while storing media.
#[derive(Debug, thiserror::Error)]
pub enum MediaSinkError {
    #[error("Media store unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
}

/// Port for storing media bytes and resolving them to a reference.
#[async_trait]
pub trait MediaSink: Send + Sync {
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> Result<MediaRef, MediaSinkError>;
}
