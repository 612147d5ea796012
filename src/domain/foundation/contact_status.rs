//! Status of a buyer's contact request.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Moderation status of a contact request.
///
/// `Approved` and `Rejected` are terminal: a resolved request can never
/// change again, which is what makes repeat approve/reject calls safe
/// no-ops at the workflow level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ContactRequestStatus {
    /// Returns true once the request has been approved or rejected.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ContactRequestStatus::Pending)
    }
}

impl StateMachine for ContactRequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ContactRequestStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ContactRequestStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved => vec![],
            Rejected => vec![],
        }
    }
}

impl fmt::Display for ContactRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContactRequestStatus::Pending => "PENDING",
            ContactRequestStatus::Approved => "APPROVED",
            ContactRequestStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}
