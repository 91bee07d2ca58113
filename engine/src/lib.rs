//! Engagement Integrity Engine — the orchestrator every caller goes through.
//!
//! The engine is the central coordinator that:
//! - Derives the caller's pseudonymous fingerprint per request
//! - Validates and sanitises content at the boundary
//! - Runs the vote ledger, poll ledger and moderation gate inside atomic
//!   store updates
//! - Projects entities into viewer-relative snapshots that never leak other
//!   actors' fingerprints or vote membership

pub mod actor;
pub mod config;
pub mod engine;
pub mod logging;
pub mod sanitize;
pub mod view;

pub use actor::Actor;
pub use config::BoardConfig;
pub use engine::{BoardEngine, FeedQuery, FeedSort};
pub use logging::{init_logging, LogFormat};
pub use view::{CommentView, PollOptionView, PollView, PostPage, PostView};
