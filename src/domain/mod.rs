//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `dialog` - Field specs, validators, flow definitions, and dialog sessions
//! - `listing` - Offer, buy-request, and match entities
//! - `contact` - Contact-request entity and its approval state machine

pub mod contact;
pub mod dialog;
pub mod foundation;
pub mod listing;
