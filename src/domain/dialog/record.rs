//! Finished records: the validated output of a completed dialog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DialogKind, DomainError, ErrorCode, Timestamp, UserId};

use super::field::{Answers, FieldValue, MediaRef};
use super::session::DialogSession;

/// The fully validated output of a completed dialog.
///
/// Ownership transfers to the record sink on save; the engine keeps no
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedRecord {
    user_id: UserId,
    dialog_kind: DialogKind,
    answers: Answers,
    completed_at: Timestamp,
}

impl FinishedRecord {
    /// Assembles a record from a terminal session.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session has unanswered fields
    pub fn from_session(session: &DialogSession) -> Result<Self, DomainError> {
        if !session.is_terminal() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot assemble a record from an unfinished dialog",
            ));
        }
        Ok(Self {
            user_id: session.user_id().clone(),
            dialog_kind: session.kind(),
            answers: session.answers().clone(),
            completed_at: Timestamp::now(),
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn dialog_kind(&self) -> DialogKind {
        self.dialog_kind
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn completed_at(&self) -> &Timestamp {
        &self.completed_at
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.answers.get(field)
    }

    /// Text-like value (text, choice, phone, email) of a field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.answers.get(field).and_then(FieldValue::as_text)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.answers.get(field).and_then(FieldValue::as_integer)
    }

    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.answers.get(field).and_then(FieldValue::as_date)
    }

    pub fn media(&self, field: &str) -> Option<&MediaRef> {
        self.answers.get(field).and_then(FieldValue::as_media)
    }

    /// Required text field, as a domain error when missing.
    ///
    /// Used when turning records into listings, where a missing field
    /// means the flow schema and the entity constructor disagree.
    pub fn require_text(&self, field: &str) -> Result<&str, DomainError> {
        self.text(field).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidEntity,
                format!("Record is missing required field '{}'", field),
            )
        })
    }

    /// Required integer field, as a domain error when missing.
    pub fn require_integer(&self, field: &str) -> Result<i64, DomainError> {
        self.integer(field).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidEntity,
                format!("Record is missing required field '{}'", field),
            )
        })
    }
}
