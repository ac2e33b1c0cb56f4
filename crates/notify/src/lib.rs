//! Best-effort awareness-email delivery.
//!
//! After an event is persisted, the ingest path asks this crate to send a
//! fixed educational message to the reported user. Delivery is strictly
//! fire-and-forget from the caller's point of view: a failure is logged and
//! never unwinds the already-persisted event.

pub mod email;

pub use email::{resolve_recipient, AwarenessMailer, EmailConfig, EmailError};
