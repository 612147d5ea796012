//! RecordSink port - persistent storage for finished dialog records.

use async_trait::async_trait;

use crate::domain::dialog::FinishedRecord;
use crate::domain::foundation::{DomainError, ErrorCode, RecordId};

/// Errors that can occur while persisting a finished record.
#[derive(Debug, thiserror::Error)]
pub enum RecordSinkError {
    /// The store is temporarily unreachable; the completion event may be
    /// retried without data loss because the session is retained.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Record rejected by store: {0}")]
    Rejected(String),
}

impl From<RecordSinkError> for DomainError {
    fn from(err: RecordSinkError) -> Self {
        DomainError::new(ErrorCode::StorageFailure, err.to_string())
    }
}

/// Port for handing finished records to the external record store.
///
/// Called exactly once per completed dialog; ownership of the record
/// transfers to the store on success.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn save(&self, record: &FinishedRecord) -> Result<RecordId, RecordSinkError>;
}
