//! Lifecycle status for offer and buy-request listings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle of a marketplace listing.
///
/// New listings from a finished dialog start in `Pending` and wait for
/// moderation. Only `Approved` and `Active` listings participate in
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Archived,
}

impl ListingStatus {
    /// Returns true if a listing in this status may be matched.
    pub fn is_matchable(&self) -> bool {
        matches!(self, ListingStatus::Approved | ListingStatus::Active)
    }
}

impl StateMachine for ListingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ListingStatus::*;
        matches!(
            (self, target),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Approved, Active)
                | (Approved, Archived)
                | (Active, Archived)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ListingStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved => vec![Active, Archived],
            Active => vec![Archived],
            Rejected => vec![],
            Archived => vec![],
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListingStatus::Pending => "PENDING",
            ListingStatus::Approved => "APPROVED",
            ListingStatus::Rejected => "REJECTED",
            ListingStatus::Active => "ACTIVE",
            ListingStatus::Archived => "ARCHIVED",
        };
        write!(f, "{}", s)
    }
}
