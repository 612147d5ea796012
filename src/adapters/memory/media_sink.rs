//! In-memory media sink.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::dialog::MediaRef;
use crate::ports::{MediaSink, MediaSinkError};

const ACCEPTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "video/mp4"];

/// Media sink keeping uploaded bytes in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMediaSink {
    stored: Arc<RwLock<Vec<(MediaRef, Vec<u8>)>>>,
}

impl InMemoryMediaSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.stored.read().await.len()
    }

    /// Bytes stored under a key, if any.
    pub async fn bytes_for(&self, key: &str) -> Option<Vec<u8>> {
        self.stored
            .read()
            .await
            .iter()
            .find(|(media, _)| media.key == key)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl MediaSink for InMemoryMediaSink {
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> Result<MediaRef, MediaSinkError> {
        if !ACCEPTED_CONTENT_TYPES.contains(&content_type) {
            return Err(MediaSinkError::UnsupportedContentType(
                content_type.to_string(),
            ));
        }
        let key = Uuid::new_v4().to_string();
        let media = MediaRef {
            url: format!("https://media.herdlink.local/{key}"),
            key,
        };
        self.stored.write().await.push((media.clone(), bytes));
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_returns_resolvable_reference() {
        let sink = InMemoryMediaSink::new();
        let media = sink.store(vec![1, 2, 3], "image/jpeg").await.unwrap();

        assert!(media.url.ends_with(&media.key));
        assert_eq!(sink.bytes_for(&media.key).await, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn unsupported_content_type_is_rejected() {
        let sink = InMemoryMediaSink::new();
        let result = sink.store(vec![0], "application/zip").await;

        assert!(matches!(
            result,
            Err(MediaSinkError::UnsupportedContentType(_))
        ));
        assert_eq!(sink.len().await, 0);
    }
}
