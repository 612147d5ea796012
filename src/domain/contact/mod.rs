//! Contact module - the moderated contact-disclosure entity.

mod contact_request;

pub use contact_request::ContactRequest;
