//! Fundamental types for the CampusTalk board.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: entity ids, the actor fingerprint token, timestamps, status
//! enums, board parameters, and the common error taxonomy.

pub mod error;
pub mod fingerprint;
pub mod id;
pub mod params;
pub mod state;
pub mod time;

pub use error::BoardError;
pub use fingerprint::Fingerprint;
pub use id::{AccountId, OptionId, PollId, PostId};
pub use params::BoardParams;
pub use state::{PostStatus, VoteKind};
pub use time::Timestamp;
