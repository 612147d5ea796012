//! In-flight dialog session state.
//!
//! A session tracks one user's progress through one flow. Sessions are
//! value types: `advance` and `rewind_to` return the updated session and
//! leave persistence to the caller, so the engine controls exactly when
//! state becomes visible in the store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DialogKind, DomainError, ErrorCode, Timestamp, UserId};

use super::field::{Answers, FieldSpec, FieldValue};
use super::flow::FlowDefinition;

/// Storage key of a session: one live session per (user, dialog kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub user_id: UserId,
    pub kind: DialogKind,
}

impl SessionKey {
    pub fn new(user_id: UserId, kind: DialogKind) -> Self {
        Self { user_id, kind }
    }
}

/// The in-flight state of one user's progress through one dialog kind.
///
/// # Invariants
///
/// - `cursor`, when `Some`, always indexes a field of the session's flow.
/// - `cursor == None` means the flow is complete; assembling a finished
///   record is only possible in that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogSession {
    key: SessionKey,
    cursor: Option<usize>,
    answers: Answers,
    created_at: Timestamp,
    last_touched_at: Timestamp,
}

impl DialogSession {
    /// Starts a session at the first field of a flow.
    ///
    /// `seed` carries answers supplied by the transport before the dialog
    /// begins (the registrant role, the offer a comment refers to).
    pub fn start(flow: &FlowDefinition, user_id: UserId, seed: Answers) -> Self {
        let now = Timestamp::now();
        Self {
            key: SessionKey::new(user_id, flow.kind()),
            cursor: Some(0),
            answers: seed,
            created_at: now,
            last_touched_at: now,
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn user_id(&self) -> &UserId {
        &self.key.user_id
    }

    pub fn kind(&self) -> DialogKind {
        self.key.kind
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_touched_at(&self) -> &Timestamp {
        &self.last_touched_at
    }

    /// Returns the field the session is currently waiting on, or `None`
    /// once the flow is complete.
    pub fn current_field<'a>(&self, flow: &'a FlowDefinition) -> Option<&'a FieldSpec> {
        self.cursor.and_then(|position| flow.field_at(position))
    }

    /// True once every required field (given the taken branches) is answered.
    pub fn is_terminal(&self) -> bool {
        self.cursor.is_none()
    }

    /// Records a validated answer for the current field and moves the
    /// cursor to the next one.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the session is already terminal
    pub fn advance(
        mut self,
        flow: &FlowDefinition,
        value: FieldValue,
    ) -> Result<Self, DomainError> {
        let position = self.cursor.ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot advance a completed dialog",
            )
        })?;
        let field = flow.field_at(position).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Session cursor points past flow end")
        })?;

        self.answers.insert(field.name().to_string(), value);
        self.cursor = flow.next_position(position, &self.answers);
        self.last_touched_at = Timestamp::now();
        Ok(self)
    }

    /// Moves the cursor back to an earlier field, discarding its answer.
    ///
    /// Used when a confirmation field mismatches: the user re-enters the
    /// original value and the flow replays forward from there.
    pub fn rewind_to(mut self, flow: &FlowDefinition, field: &str) -> Result<Self, DomainError> {
        let position = flow.position(field).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Cannot rewind to unknown field '{}'", field),
            )
        })?;
        self.answers.remove(field);
        self.cursor = Some(position);
        self.last_touched_at = Timestamp::now();
        Ok(self)
    }

    /// Refreshes the idle timer without changing dialog state.
    pub fn touch(&mut self) {
        self.last_touched_at = Timestamp::now();
    }

    /// True if the session has been idle strictly longer than `ttl_secs`
    /// as of `now`.
    pub fn is_idle(&self, now: &Timestamp, ttl_secs: u64) -> bool {
        now.secs_since(&self.last_touched_at) > ttl_secs as i64
    }
}
