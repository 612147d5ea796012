//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversational core and the outside world. Adapters implement
//! these ports.
//!
//! - `SessionStore` - in-flight dialog state with per-key advisory locks
//! - `RecordSink` - persistent store for finished dialog records
//! - `Notifier` - best-effort outbound messages to users
//! - `MediaSink` - opaque photo/video storage
//! - `ListingRepository` - offers and buy-requests
//! - `MatchRepository` - offer/request matches, unique per pair
//! - `ContactRequestRepository` - moderated contact requests

mod contact_repository;
mod listing_repository;
mod match_repository;
mod media_sink;
mod notifier;
mod record_sink;
mod session_store;

pub use contact_repository::{ContactRepositoryError, ContactRequestRepository};
pub use listing_repository::{ListingRepository, ListingRepositoryError};
pub use match_repository::{MatchRepository, MatchRepositoryError};
pub use media_sink::{MediaSink, MediaSinkError};
pub use notifier::{Notifier, NotifyError};
pub use record_sink::{RecordSink, RecordSinkError};
pub use session_store::{SessionGuard, SessionStore, SessionStoreError};
