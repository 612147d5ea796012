//! Herdlink - Livestock Marketplace Conversational Core
//!
//! This crate implements the conversational session engine of a livestock
//! marketplace: multi-step dialogs that collect structured data one field
//! at a time, a matching engine pairing buy-requests with sell-offers, and
//! the moderated contact-request workflow.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
