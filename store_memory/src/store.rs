//! The in-memory store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use campustalk_store::{
    PollDraft, PollRecord, PollStore, PostDraft, PostRecord, PostStore, StoreError,
};
use campustalk_types::{BoardError, PollId, PostId};

/// One table: monotonically assigned ids, one mutex per row.
///
/// The outer `RwLock` guards the map shape (insert/remove); the inner
/// per-row mutex guards the record. Closure updates hold the outer read
/// lock across the row lock so a concurrent remove cannot strand a commit.
struct Table<K, V> {
    next_id: AtomicU64,
    rows: RwLock<HashMap<K, Arc<Mutex<V>>>>,
}

impl<K, V> Table<K, V>
where
    K: std::hash::Hash + Eq + Copy,
    V: Clone,
{
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            rows: RwLock::new(HashMap::new()),
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn insert(&self, key: K, row: V) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Backend("table lock poisoned".into()))?;
        rows.insert(key, Arc::new(Mutex::new(row)));
        Ok(())
    }

    fn get(&self, key: K, what: &str) -> Result<V, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Backend("table lock poisoned".into()))?;
        let cell = rows
            .get(&key)
            .ok_or_else(|| StoreError::NotFound(what.to_string()))?;
        let row = cell
            .lock()
            .map_err(|_| StoreError::Backend("row lock poisoned".into()))?;
        Ok(row.clone())
    }

    /// Run `mutate` against a working copy under the row lock; commit only
    /// on `Ok`. An `Err` leaves the stored record untouched.
    fn update(
        &self,
        key: K,
        what: &str,
        mutate: &mut dyn FnMut(&mut V) -> Result<(), BoardError>,
    ) -> Result<V, BoardError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| BoardError::Store("table lock poisoned".into()))?;
        let cell = rows
            .get(&key)
            .ok_or_else(|| BoardError::NotFound(what.to_string()))?;
        let mut row = cell
            .lock()
            .map_err(|_| BoardError::Store("row lock poisoned".into()))?;
        let mut working = row.clone();
        mutate(&mut working)?;
        *row = working.clone();
        Ok(working)
    }

    fn remove(&self, key: K, what: &str) -> Result<(), StoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Backend("table lock poisoned".into()))?;
        rows.remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(what.to_string()))
    }

    fn iter(&self) -> Result<Vec<V>, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StoreError::Backend("table lock poisoned".into()))?;
        let mut out = Vec::with_capacity(rows.len());
        for cell in rows.values() {
            let row = cell
                .lock()
                .map_err(|_| StoreError::Backend("row lock poisoned".into()))?;
            out.push(row.clone());
        }
        Ok(out)
    }
}

/// In-memory backend holding both tables.
pub struct MemoryStore {
    posts: Table<PostId, PostRecord>,
    polls: Table<PollId, PollRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            posts: Table::new(),
            polls: Table::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryStore {
    fn insert_post(&self, draft: PostDraft) -> Result<PostRecord, StoreError> {
        let id = PostId::new(self.posts.allocate_id());
        let record = PostRecord::from_draft(id, draft);
        self.posts.insert(id, record.clone())?;
        Ok(record)
    }

    fn get_post(&self, id: PostId) -> Result<PostRecord, StoreError> {
        self.posts.get(id, "post")
    }

    fn update_post(
        &self,
        id: PostId,
        mutate: &mut dyn FnMut(&mut PostRecord) -> Result<(), BoardError>,
    ) -> Result<PostRecord, BoardError> {
        self.posts.update(id, "post", mutate)
    }

    fn remove_post(&self, id: PostId) -> Result<(), StoreError> {
        self.posts.remove(id, "post")
    }

    fn iter_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        self.posts.iter()
    }
}

impl PollStore for MemoryStore {
    fn insert_poll(&self, draft: PollDraft) -> Result<PollRecord, StoreError> {
        let id = PollId::new(self.polls.allocate_id());
        let record = PollRecord::from_draft(id, draft);
        self.polls.insert(id, record.clone())?;
        Ok(record)
    }

    fn get_poll(&self, id: PollId) -> Result<PollRecord, StoreError> {
        self.polls.get(id, "poll")
    }

    fn update_poll(
        &self,
        id: PollId,
        mutate: &mut dyn FnMut(&mut PollRecord) -> Result<(), BoardError>,
    ) -> Result<PollRecord, BoardError> {
        self.polls.update(id, "poll", mutate)
    }

    fn remove_poll(&self, id: PollId) -> Result<(), StoreError> {
        self.polls.remove(id, "poll")
    }

    fn iter_polls(&self) -> Result<Vec<PollRecord>, StoreError> {
        self.polls.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustalk_types::{Fingerprint, Timestamp};
    use std::sync::Arc;

    fn draft() -> PostDraft {
        PostDraft {
            content: "late night dining hall appreciation".into(),
            category: "Appreciation".into(),
            owner: Fingerprint::new([7u8; 32]),
            author: None,
            created_at: Timestamp::new(1_000),
        }
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert_post(draft()).unwrap();
        let b = store.insert_post(draft()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.post_count().unwrap(), 2);
    }

    #[test]
    fn get_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get_post(PostId::new(99)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_commits_on_ok() {
        let store = MemoryStore::new();
        let post = store.insert_post(draft()).unwrap();
        let updated = store
            .update_post(post.id, &mut |p| {
                p.reports += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.reports, 1);
        assert_eq!(store.get_post(post.id).unwrap().reports, 1);
    }

    #[test]
    fn update_rolls_back_on_err() {
        let store = MemoryStore::new();
        let post = store.insert_post(draft()).unwrap();
        let result = store.update_post(post.id, &mut |p| {
            p.reports += 1;
            p.upvotes += 1;
            Err(BoardError::Invalid("abort".into()))
        });
        assert!(result.is_err());
        let stored = store.get_post(post.id).unwrap();
        assert_eq!(stored.reports, 0);
        assert_eq!(stored.upvotes, 0);
    }

    #[test]
    fn remove_then_get_is_not_found() {
        let store = MemoryStore::new();
        let post = store.insert_post(draft()).unwrap();
        store.remove_post(post.id).unwrap();
        assert!(matches!(
            store.get_post(post.id),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove_post(post.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn concurrent_updates_never_lose_increments() {
        let store = Arc::new(MemoryStore::new());
        let post = store.insert_post(draft()).unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            let id = post.id;
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store
                        .update_post(id, &mut |p| {
                            p.reports += 1;
                            Ok(())
                        })
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_post(post.id).unwrap().reports, 400);
    }
}
