//! Status and action enums for posts and votes.

use serde::{Deserialize, Serialize};

/// The moderation status of a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Visible in feeds and open to engagement.
    Active,
    /// Auto-suppressed by the report threshold; awaiting moderator review.
    Hidden,
    /// Removed by owner or moderator. Terminal.
    Deleted,
}

impl PostStatus {
    /// Whether the post appears in public feeds.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether engagement operations (vote, comment, report, edit) may
    /// still target the post. Hidden posts can be reported further and
    /// restored; deleted posts are gone.
    pub fn accepts_engagement(&self) -> bool {
        !matches!(self, Self::Deleted)
    }
}

/// The two post-vote actions. A closed enum so the six-transition vote
/// state machine is exhaustively checkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Upvote,
    Downvote,
}

impl VoteKind {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Upvote => Self::Downvote,
            Self::Downvote => Self::Upvote,
        }
    }
}
