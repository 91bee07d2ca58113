//! Poll storage trait and records.

use crate::StoreError;
use campustalk_types::{BoardError, Fingerprint, PollId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single poll option: display text plus its vote counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollOptionRecord {
    pub text: String,
    pub votes: u32,
}

/// A poll as held by the store.
///
/// Invariant maintained by the poll ledger: the sum of option counters
/// equals `voters.len()`, and a fingerprint enters `voters` at most once,
/// permanently — poll votes are not retractable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollRecord {
    pub id: PollId,
    pub question: String,
    pub options: Vec<PollOptionRecord>,
    pub expires_at: Timestamp,
    /// Fingerprint of the creator.
    pub owner: Fingerprint,
    /// Fingerprints that have exercised their one vote.
    pub voters: BTreeSet<Fingerprint>,
    pub created_at: Timestamp,
}

/// Everything needed to create a poll; the store assigns the id.
#[derive(Clone, Debug)]
pub struct PollDraft {
    pub question: String,
    pub option_texts: Vec<String>,
    pub expires_at: Timestamp,
    pub owner: Fingerprint,
    pub created_at: Timestamp,
}

impl PollRecord {
    pub fn from_draft(id: PollId, draft: PollDraft) -> Self {
        Self {
            id,
            question: draft.question,
            options: draft
                .option_texts
                .into_iter()
                .map(|text| PollOptionRecord { text, votes: 0 })
                .collect(),
            expires_at: draft.expires_at,
            owner: draft.owner,
            voters: BTreeSet::new(),
            created_at: draft.created_at,
        }
    }

    /// Sum of all option counters.
    pub fn total_votes(&self) -> u32 {
        self.options.iter().map(|o| o.votes).sum()
    }

    /// Check the counter/voters mirror invariant.
    pub fn counters_consistent(&self) -> bool {
        self.total_votes() as usize == self.voters.len()
    }
}

/// Trait for poll storage operations.
pub trait PollStore: Send + Sync {
    /// Insert a new poll, assigning its id.
    fn insert_poll(&self, draft: PollDraft) -> Result<PollRecord, StoreError>;

    /// Fetch a poll by id.
    fn get_poll(&self, id: PollId) -> Result<PollRecord, StoreError>;

    /// Atomically read-modify-write a poll. Same commit-on-`Ok` contract as
    /// [`PostStore::update_post`](crate::PostStore::update_post).
    fn update_poll(
        &self,
        id: PollId,
        mutate: &mut dyn FnMut(&mut PollRecord) -> Result<(), BoardError>,
    ) -> Result<PollRecord, BoardError>;

    /// Hard-remove a poll.
    fn remove_poll(&self, id: PollId) -> Result<(), StoreError>;

    /// All polls, unordered.
    fn iter_polls(&self) -> Result<Vec<PollRecord>, StoreError>;

    fn poll_count(&self) -> Result<u64, StoreError> {
        self.iter_polls().map(|v| v.len() as u64)
    }
}
