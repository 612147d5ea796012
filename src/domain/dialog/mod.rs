//! Dialog module - flows, validation, sessions, and finished records.
//!
//! The conversational core: what to ask, how to check the answer, where
//! the dialog goes next, and what a completed dialog produces.

mod field;
mod flow;
pub mod flows;
mod record;
mod session;
pub mod validator;

pub use field::{Answers, BranchFn, FieldKind, FieldSpec, FieldValue, Jump, MediaRef};
pub use flow::FlowDefinition;
pub use record::FinishedRecord;
pub use session::{DialogSession, SessionKey};
