//! The six-transition vote state machine.

use campustalk_store::PostRecord;
use campustalk_types::{AccountId, VoteKind};
use serde::{Deserialize, Serialize};

/// An account's current vote standing on one post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteState {
    None,
    Upvoted,
    Downvoted,
}

impl VoteState {
    /// Read the state from the membership sets. The sets are disjoint, so
    /// at most one branch matches.
    pub fn of(post: &PostRecord, account: &AccountId) -> Self {
        if post.upvoted_by.contains(account) {
            Self::Upvoted
        } else if post.downvoted_by.contains(account) {
            Self::Downvoted
        } else {
            Self::None
        }
    }
}

/// Apply one vote action and return the resulting state.
///
/// Transitions:
/// - none      + upvote   → upvoted    (cast)
/// - none      + downvote → downvoted  (cast)
/// - upvoted   + upvote   → none       (toggle off)
/// - downvoted + downvote → none       (toggle off)
/// - upvoted   + downvote → downvoted  (switch)
/// - downvoted + upvote   → upvoted    (switch)
///
/// Counter and set mutations happen together in each arm; counters use
/// saturating decrements so they can never go negative even on a record
/// whose invariant was broken externally.
pub fn apply_vote(post: &mut PostRecord, account: &AccountId, kind: VoteKind) -> VoteState {
    let current = VoteState::of(post, account);
    match (current, kind) {
        (VoteState::None, VoteKind::Upvote) => {
            post.upvoted_by.insert(account.clone());
            post.upvotes += 1;
            VoteState::Upvoted
        }
        (VoteState::None, VoteKind::Downvote) => {
            post.downvoted_by.insert(account.clone());
            post.downvotes += 1;
            VoteState::Downvoted
        }
        (VoteState::Upvoted, VoteKind::Upvote) => {
            post.upvoted_by.remove(account);
            post.upvotes = post.upvotes.saturating_sub(1);
            VoteState::None
        }
        (VoteState::Downvoted, VoteKind::Downvote) => {
            post.downvoted_by.remove(account);
            post.downvotes = post.downvotes.saturating_sub(1);
            VoteState::None
        }
        (VoteState::Upvoted, VoteKind::Downvote) => {
            post.upvoted_by.remove(account);
            post.upvotes = post.upvotes.saturating_sub(1);
            post.downvoted_by.insert(account.clone());
            post.downvotes += 1;
            VoteState::Downvoted
        }
        (VoteState::Downvoted, VoteKind::Upvote) => {
            post.downvoted_by.remove(account);
            post.downvotes = post.downvotes.saturating_sub(1);
            post.upvoted_by.insert(account.clone());
            post.upvotes += 1;
            VoteState::Upvoted
        }
    }
}
