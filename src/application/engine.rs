//! Conversation engine: drives dialog sessions from transport events.
//!
//! The engine is transport-agnostic. It receives "user said X" events,
//! validates them against the active flow, and answers with the next
//! prompt or the finished record. Per-key advisory locks from the session
//! store serialize concurrent events for the same session; everything
//! else is a pure function of session state.

use std::sync::Arc;
use tracing::debug;

use crate::domain::dialog::{
    flows, validator, Answers, DialogSession, FieldSpec, FieldValue, FinishedRecord, SessionKey,
};
use crate::domain::foundation::{DialogKind, DomainError, ErrorCode, UserId};
use crate::ports::SessionStore;

/// One incoming answer from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    /// Raw text the user typed (or the button label they pressed).
    Answer(String),
    /// The user skipped the current field.
    Skip,
    /// The user abandoned the dialog.
    Cancel,
}

/// The engine's reply to one event.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineReply {
    /// Ask the user the next question.
    Prompt {
        field: String,
        text: String,
        choices: Vec<String>,
    },
    /// The dialog finished; the session stays live until the record is
    /// durably saved.
    RecordEmitted(FinishedRecord),
    /// The answer failed validation; the session is unchanged and the
    /// same field will be asked again.
    ValidationFailed { field: String, reason: String },
    /// No live session for this (user, dialog kind).
    NoSession,
    /// The dialog was abandoned and its session removed.
    Cancelled,
}

impl EngineReply {
    fn prompt_for(spec: &FieldSpec) -> Self {
        EngineReply::Prompt {
            field: spec.name().to_string(),
            text: spec.prompt().to_string(),
            choices: spec.choices(),
        }
    }
}

/// Drives dialog sessions through their flows.
pub struct ConversationEngine {
    store: Arc<dyn SessionStore>,
}

impl ConversationEngine {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Starts (or restarts) a dialog for a user and returns the first
    /// prompt.
    ///
    /// `seed` carries answers the transport already knows (the
    /// registrant's role, the offer a contact comment refers to).
    ///
    /// # Errors
    ///
    /// - `SessionBusy` if another event for this session is in flight
    /// - `StorageFailure` if the session store fails
    pub async fn start(
        &self,
        user_id: UserId,
        kind: DialogKind,
        seed: Answers,
    ) -> Result<EngineReply, DomainError> {
        let key = SessionKey::new(user_id.clone(), kind);
        let _guard = self.store.try_acquire(&key).await?;

        let flow = flows::flow_for(kind);
        let session = DialogSession::start(flow, user_id, seed);
        let first = session
            .current_field(flow)
            .map(EngineReply::prompt_for)
            // A flow always has at least one field; guard anyway.
            .unwrap_or(EngineReply::NoSession);

        debug!(kind = %kind, "dialog started");
        self.store.put(session).await?;
        Ok(first)
    }

    /// Handles one answer for the user's live session.
    ///
    /// Completed sessions re-emit their record: completion is
    /// at-least-once, and the session is only removed once the record is
    /// durably saved.
    ///
    /// # Errors
    ///
    /// - `SessionBusy` if another event for this session is in flight
    /// - `StorageFailure` if the session store fails
    pub async fn handle_answer(
        &self,
        user_id: &UserId,
        kind: DialogKind,
        input: AnswerInput,
    ) -> Result<EngineReply, DomainError> {
        let key = SessionKey::new(user_id.clone(), kind);
        let _guard = self.store.try_acquire(&key).await?;

        if input == AnswerInput::Cancel {
            self.store.delete(&key).await?;
            debug!(kind = %kind, "dialog cancelled");
            return Ok(EngineReply::Cancelled);
        }

        let Some(session) = self.store.get(&key).await? else {
            return Ok(EngineReply::NoSession);
        };
        let flow = flows::flow_for(kind);

        if session.is_terminal() {
            // Record save has not completed yet; emit the same record again.
            return Ok(EngineReply::RecordEmitted(FinishedRecord::from_session(&session)?));
        }

        let spec = session.current_field(flow).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Live session has no current field")
        })?;

        let value = match input {
            // Handled before the session lookup.
            AnswerInput::Cancel => return Ok(EngineReply::Cancelled),
            AnswerInput::Skip if spec.is_optional() => FieldValue::Absent,
            AnswerInput::Skip => {
                let reply = EngineReply::ValidationFailed {
                    field: spec.name().to_string(),
                    reason: "This field cannot be skipped".to_string(),
                };
                self.keep_alive(session).await?;
                return Ok(reply);
            }
            AnswerInput::Answer(raw) => match validator::validate(spec, &raw) {
                Ok(value) => value,
                Err(err) => {
                    debug!(field = spec.name(), %err, "answer rejected");
                    let reply = EngineReply::ValidationFailed {
                        field: spec.name().to_string(),
                        reason: err.to_string(),
                    };
                    self.keep_alive(session).await?;
                    return Ok(reply);
                }
            },
        };

        // Confirmation fields replay the flow from the confirmed field on
        // mismatch instead of failing in place.
        if let Some(target) = spec.confirms_field() {
            if session.answers().get(target) != Some(&value) {
                debug!(field = spec.name(), target, "confirmation mismatch, rewinding");
                let session = session.rewind_to(flow, target)?;
                let reply = session
                    .current_field(flow)
                    .map(EngineReply::prompt_for)
                    .unwrap_or(EngineReply::NoSession);
                self.store.put(session).await?;
                return Ok(reply);
            }
        }

        let session = session.advance(flow, value)?;
        let reply = match session.current_field(flow) {
            Some(next) => EngineReply::prompt_for(next),
            None => EngineReply::RecordEmitted(FinishedRecord::from_session(&session)?),
        };
        self.store.put(session).await?;
        Ok(reply)
    }

    /// Cancels the user's live session, if any. Idempotent.
    ///
    /// # Errors
    ///
    /// - `SessionBusy` if another event for this session is in flight
    /// - `StorageFailure` if the session store fails
    pub async fn cancel(&self, user_id: &UserId, kind: DialogKind) -> Result<(), DomainError> {
        let key = SessionKey::new(user_id.clone(), kind);
        let _guard = self.store.try_acquire(&key).await?;
        self.store.delete(&key).await?;
        debug!(kind = %kind, "dialog cancelled");
        Ok(())
    }

    // Refreshes the idle timer after a rejected answer so a user fighting
    // the validator does not get swept mid-dialog.
    async fn keep_alive(&self, mut session: DialogSession) -> Result<(), DomainError> {
        session.touch();
        self.store.put(session).await?;
        Ok(())
    }
}
