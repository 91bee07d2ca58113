//! Moderation Gate — report accumulation and automatic suppression.
//!
//! The state machine:
//!
//! ```text
//! active --[reports >= threshold]--> hidden --[moderator restore]--> active
//! active|hidden --[moderator delete]--> deleted   (terminal)
//! ```
//!
//! Reports are anonymous and never deduplicated per actor: the counter is
//! the whole signal, so repeat reports from one actor all count and a
//! single determined reporter can reach the threshold alone. The report
//! counter only ever increases.

pub mod gate;

pub use gate::{delete, record_report, restore};
