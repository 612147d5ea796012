//! Status of an offer/request match.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Moderation status of a match between an offer and a buy-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Pending,
    Approved,
    Rejected,
}

impl StateMachine for MatchStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MatchStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MatchStatus::*;
        match self {
            Pending => vec![Approved, Rejected],
            Approved => vec![],
            Rejected => vec![],
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchStatus::Pending => "PENDING",
            MatchStatus::Approved => "APPROVED",
            MatchStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}
