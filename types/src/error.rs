//! Top-level error taxonomy shared across crates.
//!
//! Every variant is recoverable at the caller: either the whole operation
//! committed or none of it did. Store-level faults surface as the transient
//! `Store` variant and are safe to retry.

use thiserror::Error;

/// Common error type for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("actor does not own this {0}")]
    Forbidden(String),

    #[error("voting requires an authenticated account")]
    Unauthorized,

    #[error("this actor has already voted in the poll")]
    AlreadyVoted,

    #[error("poll has expired")]
    Expired,

    #[error("option {0} does not exist in this poll")]
    InvalidOption(u32),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    Store(String),
}

impl BoardError {
    /// Whether retrying the same request could succeed without any other
    /// state change. Only transient store faults qualify.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
