//! The report accumulator and status transitions.

use campustalk_store::PostRecord;
use campustalk_types::{BoardError, PostStatus};

/// Register one abuse report against a post.
///
/// Increments the counter unconditionally; when an active post's
/// post-increment count reaches `threshold`, the post flips to hidden.
/// Already-hidden posts keep accumulating reports without further
/// transitions. Returns the resulting status. Callers run this inside a
/// store closure update, so concurrent reporters serialize and the
/// threshold crossing fires exactly once.
pub fn record_report(post: &mut PostRecord, threshold: u32) -> PostStatus {
    post.reports = post.reports.saturating_add(1);
    if post.status == PostStatus::Active && post.reports >= threshold {
        post.status = PostStatus::Hidden;
    }
    post.status
}

/// Moderator action: return a hidden post to the feed.
///
/// The report counter is left intact — reports never decrement — so a
/// restored post that attracts even one further report goes straight back
/// to hidden. Deleted posts cannot come back.
pub fn restore(post: &mut PostRecord) -> Result<(), BoardError> {
    if post.status == PostStatus::Deleted {
        return Err(BoardError::NotFound("post".into()));
    }
    post.status = PostStatus::Active;
    Ok(())
}

/// Moderator action: soft-delete a post. Terminal.
pub fn delete(post: &mut PostRecord) -> Result<(), BoardError> {
    if post.status == PostStatus::Deleted {
        return Err(BoardError::NotFound("post".into()));
    }
    post.status = PostStatus::Deleted;
    Ok(())
}
