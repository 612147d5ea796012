//! Listing module - offers, buy-requests, and matches.
//!
//! These entities are referenced, not owned, by the conversational core:
//! the record store is their system of record, this crate reads and
//! writes them through ports.

mod match_record;
mod offer;
mod request;

pub use match_record::MatchRecord;
pub use offer::Offer;
pub use request::BuyRequest;
