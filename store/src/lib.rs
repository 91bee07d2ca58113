//! Abstract storage traits for the CampusTalk board.
//!
//! Every storage backend (in-memory for now, a database later) implements
//! these traits. The rest of the codebase depends only on the traits.
//!
//! The one contract that matters for correctness is the closure-update
//! primitive on each trait: the closure runs against the current record
//! under a per-entity lock, and the mutation commits only if the closure
//! returns `Ok`. That is what makes the vote and report read-modify-write
//! sequences linearizable per entity — callers never do "read, mutate in
//! application memory, write back" on their own.

pub mod error;
pub mod poll;
pub mod post;

pub use error::StoreError;
pub use poll::{PollDraft, PollOptionRecord, PollRecord, PollStore};
pub use post::{CommentRecord, PostDraft, PostRecord, PostStore};
