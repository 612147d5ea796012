//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Herdlink domain.

mod contact_status;
mod dialog_kind;
mod errors;
mod ids;
mod listing_status;
mod match_status;
mod state_machine;
mod timestamp;

pub use contact_status::ContactRequestStatus;
pub use dialog_kind::DialogKind;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ContactRequestId, MatchId, OfferId, RecordId, RequestId, UserId};
pub use listing_status::ListingStatus;
pub use match_status::MatchStatus;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
