//! In-memory adapters.
//!
//! The session store is the production implementation (sessions are
//! ephemeral by design); the rest back tests and local runs.

mod contact_store;
mod listing_store;
mod match_store;
mod media_sink;
mod notifier;
mod record_sink;
mod session_store;

pub use contact_store::InMemoryContactStore;
pub use listing_store::InMemoryListingStore;
pub use match_store::InMemoryMatchStore;
pub use media_sink::InMemoryMediaSink;
pub use notifier::InMemoryNotifier;
pub use record_sink::InMemoryRecordSink;
pub use session_store::InMemorySessionStore;
