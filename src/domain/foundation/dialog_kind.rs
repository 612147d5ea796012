//! The category of multi-step dialog a user can run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Category of a multi-step conversational flow.
///
/// A user holds at most one live session per kind, so a seller can be in
/// the middle of creating an offer while editing their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Registration,
    OfferCreation,
    RequestCreation,
    ProfileEdit,
    ContactComment,
}

impl DialogKind {
    /// All dialog kinds in a stable order.
    pub fn all() -> [DialogKind; 5] {
        [
            DialogKind::Registration,
            DialogKind::OfferCreation,
            DialogKind::RequestCreation,
            DialogKind::ProfileEdit,
            DialogKind::ContactComment,
        ]
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Registration => "registration",
            DialogKind::OfferCreation => "offer_creation",
            DialogKind::RequestCreation => "request_creation",
            DialogKind::ProfileEdit => "profile_edit",
            DialogKind::ContactComment => "contact_comment",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(DialogKind::Registration),
            "offer_creation" => Ok(DialogKind::OfferCreation),
            "request_creation" => Ok(DialogKind::RequestCreation),
            "profile_edit" => Ok(DialogKind::ProfileEdit),
            "contact_comment" => Ok(DialogKind::ContactComment),
            other => Err(ValidationError::invalid_format(
                "dialog_kind",
                format!("unknown dialog kind '{}'", other),
            )),
        }
    }
}
