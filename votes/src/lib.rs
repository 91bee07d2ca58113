//! Vote Ledger — the post-voting state machine.
//!
//! Per (post, account) there are three states: no vote, upvoted, downvoted.
//! Applying an action toggles it off, switches sides, or casts it — six
//! legal transitions in total, and no others are reachable. The ledger
//! mutates counters and membership sets together, so
//! `upvotes == |upvoted_by|` (and likewise for downvotes) holds after every
//! transition.
//!
//! The ledger is pure record manipulation: callers run it inside a store
//! closure update so the whole read-modify-write commits atomically.

pub mod ledger;

pub use ledger::{apply_vote, VoteState};
