//! Post storage trait and records.

use crate::StoreError;
use campustalk_types::{AccountId, BoardError, Fingerprint, PostId, PostStatus, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A comment attached to a post, with its own attribution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentRecord {
    pub content: String,
    /// Fingerprint of the commenter (guest or account).
    pub owner: Fingerprint,
    /// Linked account, when the commenter was authenticated.
    pub author: Option<AccountId>,
    pub created_at: Timestamp,
}

/// A post as held by the store.
///
/// Invariants maintained by the vote ledger and moderation gate:
/// `upvotes == upvoted_by.len()`, `downvotes == downvoted_by.len()`, an
/// account appears in at most one of the two sets, and `reports` never
/// decreases.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub content: String,
    pub category: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub upvoted_by: BTreeSet<AccountId>,
    pub downvoted_by: BTreeSet<AccountId>,
    pub reports: u32,
    pub status: PostStatus,
    pub comments: Vec<CommentRecord>,
    /// Fingerprint of the creator — the only ownership record kept.
    pub owner: Fingerprint,
    /// Linked account, when the creator was authenticated.
    pub author: Option<AccountId>,
    pub created_at: Timestamp,
}

/// Everything needed to create a post; the store assigns the id.
#[derive(Clone, Debug)]
pub struct PostDraft {
    pub content: String,
    pub category: String,
    pub owner: Fingerprint,
    pub author: Option<AccountId>,
    pub created_at: Timestamp,
}

impl PostRecord {
    /// Materialise a fresh record from a draft with zeroed engagement state.
    pub fn from_draft(id: PostId, draft: PostDraft) -> Self {
        Self {
            id,
            content: draft.content,
            category: draft.category,
            upvotes: 0,
            downvotes: 0,
            upvoted_by: BTreeSet::new(),
            downvoted_by: BTreeSet::new(),
            reports: 0,
            status: PostStatus::Active,
            comments: Vec::new(),
            owner: draft.owner,
            author: draft.author,
            created_at: draft.created_at,
        }
    }

    /// Check the counter/set mirror invariant. Used by tests and debug
    /// assertions; the ledger never lets it break.
    pub fn counters_consistent(&self) -> bool {
        self.upvotes as usize == self.upvoted_by.len()
            && self.downvotes as usize == self.downvoted_by.len()
            && self.upvoted_by.intersection(&self.downvoted_by).count() == 0
    }
}

/// Trait for post storage operations.
pub trait PostStore: Send + Sync {
    /// Insert a new post, assigning its id.
    fn insert_post(&self, draft: PostDraft) -> Result<PostRecord, StoreError>;

    /// Fetch a post by id.
    fn get_post(&self, id: PostId) -> Result<PostRecord, StoreError>;

    /// Atomically read-modify-write a post.
    ///
    /// The closure runs under the entity's lock against the current record;
    /// the new state commits only when it returns `Ok`. On `Err` the record
    /// is left exactly as it was — no partial mutation is ever visible.
    /// Returns the committed record.
    fn update_post(
        &self,
        id: PostId,
        mutate: &mut dyn FnMut(&mut PostRecord) -> Result<(), BoardError>,
    ) -> Result<PostRecord, BoardError>;

    /// Hard-remove a post.
    fn remove_post(&self, id: PostId) -> Result<(), StoreError>;

    /// All posts, unordered. Filtering/sorting is the caller's concern.
    fn iter_posts(&self) -> Result<Vec<PostRecord>, StoreError>;

    fn post_count(&self) -> Result<u64, StoreError> {
        self.iter_posts().map(|v| v.len() as u64)
    }
}
