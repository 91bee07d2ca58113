//! Viewer-relative snapshots returned to callers.
//!
//! Projections compare the caller's freshly derived fingerprint (and
//! account, for post votes) against stored attribution, then drop the
//! attribution itself: no view ever contains another actor's fingerprint,
//! the `upvoted_by`/`downvoted_by` sets, or a poll's voters set.

use serde::Serialize;

use campustalk_store::{CommentRecord, PollRecord, PostRecord};
use campustalk_types::{AccountId, Fingerprint, OptionId, PollId, PostId, PostStatus, Timestamp};
use campustalk_votes::VoteState;

/// A comment as shown to one viewer.
#[derive(Clone, Debug, Serialize)]
pub struct CommentView {
    pub content: String,
    pub created_at: Timestamp,
    pub is_owner: bool,
}

impl CommentView {
    fn project(record: &CommentRecord, viewer: Fingerprint) -> Self {
        Self {
            content: record.content.clone(),
            created_at: record.created_at,
            is_owner: record.owner == viewer,
        }
    }
}

/// A post as shown to one viewer.
#[derive(Clone, Debug, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub content: String,
    pub category: String,
    pub upvotes: u32,
    pub downvotes: u32,
    pub reports: u32,
    pub status: PostStatus,
    pub comments: Vec<CommentView>,
    pub created_at: Timestamp,
    pub is_owner: bool,
    pub has_upvoted: bool,
    pub has_downvoted: bool,
}

impl PostView {
    pub fn project(
        record: &PostRecord,
        viewer: Fingerprint,
        viewer_account: Option<&AccountId>,
    ) -> Self {
        let vote_state = viewer_account
            .map(|acct| VoteState::of(record, acct))
            .unwrap_or(VoteState::None);
        Self {
            id: record.id,
            content: record.content.clone(),
            category: record.category.clone(),
            upvotes: record.upvotes,
            downvotes: record.downvotes,
            reports: record.reports,
            status: record.status,
            comments: record
                .comments
                .iter()
                .map(|c| CommentView::project(c, viewer))
                .collect(),
            created_at: record.created_at,
            is_owner: record.owner == viewer,
            has_upvoted: vote_state == VoteState::Upvoted,
            has_downvoted: vote_state == VoteState::Downvoted,
        }
    }
}

/// One page of the post feed.
#[derive(Clone, Debug, Serialize)]
pub struct PostPage {
    pub posts: Vec<PostView>,
    pub has_more: bool,
    pub total: usize,
}

/// A poll option as shown to viewers.
#[derive(Clone, Debug, Serialize)]
pub struct PollOptionView {
    pub id: OptionId,
    pub text: String,
    pub votes: u32,
}

/// A poll as shown to one viewer.
#[derive(Clone, Debug, Serialize)]
pub struct PollView {
    pub id: PollId,
    pub question: String,
    pub options: Vec<PollOptionView>,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub is_owner: bool,
    pub has_voted: bool,
}

impl PollView {
    pub fn project(record: &PollRecord, viewer: Fingerprint) -> Self {
        Self {
            id: record.id,
            question: record.question.clone(),
            options: record
                .options
                .iter()
                .enumerate()
                .map(|(idx, o)| PollOptionView {
                    id: OptionId::new(idx as u32),
                    text: o.text.clone(),
                    votes: o.votes,
                })
                .collect(),
            expires_at: record.expires_at,
            created_at: record.created_at,
            is_owner: record.owner == viewer,
            has_voted: record.voters.contains(&viewer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustalk_store::{PollDraft, PostDraft};

    fn fp(n: u8) -> Fingerprint {
        Fingerprint::new([n; 32])
    }

    #[test]
    fn post_view_json_carries_no_membership_sets() {
        let mut record = PostRecord::from_draft(
            PostId::new(1),
            PostDraft {
                content: "hi".into(),
                category: "Meme".into(),
                owner: fp(1),
                author: None,
                created_at: Timestamp::new(0),
            },
        );
        record.upvoted_by.insert(AccountId::new("someone-else"));
        record.upvotes = 1;

        let view = PostView::project(&record, fp(2), None);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("upvoted_by"));
        assert!(!json.contains("downvoted_by"));
        assert!(!json.contains("someone-else"));
        assert!(!json.contains("owner"));
    }

    #[test]
    fn poll_view_json_carries_no_voters() {
        let mut record = PollRecord::from_draft(
            PollId::new(1),
            PollDraft {
                question: "q".into(),
                option_texts: vec!["a".into(), "b".into()],
                expires_at: Timestamp::new(100),
                owner: fp(1),
                created_at: Timestamp::new(0),
            },
        );
        record.voters.insert(fp(9));
        record.options[0].votes = 1;

        let view = PollView::project(&record, fp(2));
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("voters"));
        assert!(!json.contains(&fp(9).to_string()));
    }

    #[test]
    fn flags_reflect_the_viewer() {
        let mut record = PostRecord::from_draft(
            PostId::new(1),
            PostDraft {
                content: "hi".into(),
                category: "Meme".into(),
                owner: fp(1),
                author: Some(AccountId::new("alice")),
                created_at: Timestamp::new(0),
            },
        );
        record.upvoted_by.insert(AccountId::new("alice"));
        record.upvotes = 1;

        let owner_view = PostView::project(&record, fp(1), Some(&AccountId::new("alice")));
        assert!(owner_view.is_owner);
        assert!(owner_view.has_upvoted);

        let other_view = PostView::project(&record, fp(2), Some(&AccountId::new("bob")));
        assert!(!other_view.is_owner);
        assert!(!other_view.has_upvoted);

        let guest_view = PostView::project(&record, fp(3), None);
        assert!(!guest_view.has_upvoted);
        assert!(!guest_view.has_downvoted);
    }
}
