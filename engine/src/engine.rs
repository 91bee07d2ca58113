//! The Engagement Integrity Engine.
//!
//! Every externally visible operation funnels through [`BoardEngine`]. The
//! engine derives the caller's fingerprint, validates input at the
//! boundary, then performs all counter/set mutations inside the store's
//! atomic closure updates — never read-then-write in application memory.

use std::sync::Arc;

use tracing::{debug, info};

use campustalk_identity::{fingerprint, Pepper};
use campustalk_moderation as moderation;
use campustalk_polls as polls;
use campustalk_store::{PollDraft, PollStore, PostDraft, PostStore};
use campustalk_types::{
    BoardError, BoardParams, Fingerprint, OptionId, PollId, PostId, PostStatus, Timestamp,
    VoteKind,
};
use campustalk_votes::apply_vote;

use crate::actor::Actor;
use crate::sanitize::sanitize;
use crate::view::{PollView, PostPage, PostView};
use campustalk_store::CommentRecord;

/// Feed ordering for post listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedSort {
    /// Most recent first.
    Newest,
    /// Highest upvote count first, recency as tie-breaker.
    Popular,
}

/// Parameters of one feed request.
#[derive(Clone, Debug)]
pub struct FeedQuery {
    /// Case-insensitive category filter; `None` means all categories.
    pub category: Option<String>,
    pub sort: FeedSort,
    /// 1-based page number.
    pub page: usize,
    /// Page size; `None` uses the configured default.
    pub limit: Option<usize>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            category: None,
            sort: FeedSort::Newest,
            page: 1,
            limit: None,
        }
    }
}

/// The orchestrator — composes the identity deriver, vote ledger, poll
/// ledger and moderation gate behind the public operation surface.
pub struct BoardEngine<S> {
    store: Arc<S>,
    pepper: Pepper,
    params: BoardParams,
}

impl<S> BoardEngine<S>
where
    S: PostStore + PollStore,
{
    pub fn new(store: Arc<S>, pepper: Pepper, params: BoardParams) -> Self {
        Self {
            store,
            pepper,
            params,
        }
    }

    pub fn params(&self) -> &BoardParams {
        &self.params
    }

    /// Derive the caller's pseudonymous fingerprint for this request.
    fn fingerprint_of(&self, actor: &Actor) -> Fingerprint {
        fingerprint(&actor.context(), &self.pepper)
    }

    /// Sanitise and length-check one content field.
    fn checked_content(&self, raw: &str, what: &str) -> Result<String, BoardError> {
        let clean = sanitize(raw);
        if clean.chars().count() < self.params.min_content_len {
            return Err(BoardError::Invalid(format!(
                "{what} must be at least {} characters",
                self.params.min_content_len
            )));
        }
        if clean.chars().count() > self.params.max_content_len {
            return Err(BoardError::Invalid(format!(
                "{what} cannot exceed {} characters",
                self.params.max_content_len
            )));
        }
        if self.params.is_profane(&clean) {
            return Err(BoardError::Invalid(format!(
                "{what} contains inappropriate language"
            )));
        }
        Ok(clean)
    }

    fn checked_category(&self, raw: &str) -> Result<String, BoardError> {
        let clean = sanitize(raw);
        if !self.params.is_valid_category(&clean) {
            return Err(BoardError::Invalid("invalid category selected".into()));
        }
        Ok(clean)
    }

    // ── Post operations ──────────────────────────────────────────────────

    /// Create a post attributed to the caller's fingerprint.
    pub fn create_post(
        &self,
        actor: &Actor,
        content: &str,
        category: &str,
        now: Timestamp,
    ) -> Result<PostView, BoardError> {
        let content = self.checked_content(content, "content")?;
        let category = self.checked_category(category)?;
        let owner = self.fingerprint_of(actor);

        let record = self.store.insert_post(PostDraft {
            content,
            category,
            owner,
            author: actor.account.clone(),
            created_at: now,
        })?;
        debug!(id = %record.id, category = %record.category, "post created");
        Ok(PostView::project(&record, owner, actor.account.as_ref()))
    }

    /// One page of active posts, viewer-relative.
    pub fn list_posts(&self, actor: &Actor, query: &FeedQuery) -> Result<PostPage, BoardError> {
        let viewer = self.fingerprint_of(actor);
        let mut records: Vec<_> = self
            .store
            .iter_posts()?
            .into_iter()
            .filter(|p| p.status.is_visible())
            .filter(|p| match &query.category {
                Some(cat) => p.category.eq_ignore_ascii_case(cat),
                None => true,
            })
            .collect();

        match query.sort {
            FeedSort::Newest => {
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
            FeedSort::Popular => records.sort_by(|a, b| {
                b.upvotes
                    .cmp(&a.upvotes)
                    .then(b.created_at.cmp(&a.created_at))
                    .then(b.id.cmp(&a.id))
            }),
        }

        let total = records.len();
        let limit = query.limit.unwrap_or(self.params.default_page_size).max(1);
        let page = query.page.max(1);
        let skip = (page - 1).saturating_mul(limit);
        let posts: Vec<_> = records
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|r| PostView::project(&r, viewer, actor.account.as_ref()))
            .collect();
        let has_more = skip + posts.len() < total;

        Ok(PostPage {
            posts,
            has_more,
            total,
        })
    }

    /// Fetch one post, viewer-relative. Deleted posts read as missing.
    pub fn get_post(&self, actor: &Actor, id: PostId) -> Result<PostView, BoardError> {
        let record = self.store.get_post(id)?;
        if !record.status.accepts_engagement() {
            return Err(BoardError::NotFound("post".into()));
        }
        Ok(PostView::project(
            &record,
            self.fingerprint_of(actor),
            actor.account.as_ref(),
        ))
    }

    /// Toggle/switch/cast a vote on a post. Authenticated accounts only.
    pub fn vote_post(
        &self,
        actor: &Actor,
        id: PostId,
        kind: VoteKind,
    ) -> Result<PostView, BoardError> {
        let account = actor.account.clone().ok_or(BoardError::Unauthorized)?;
        let viewer = self.fingerprint_of(actor);

        let record = self.store.update_post(id, &mut |post| {
            if !post.status.accepts_engagement() {
                return Err(BoardError::NotFound("post".into()));
            }
            let state = apply_vote(post, &account, kind);
            debug!(id = %post.id, ?kind, ?state, "post vote applied");
            Ok(())
        })?;
        Ok(PostView::project(&record, viewer, Some(&account)))
    }

    /// Report a post. Open to guests; reports are not deduplicated per
    /// actor, so the threshold is reachable by a single determined caller.
    pub fn report_post(&self, id: PostId) -> Result<PostStatus, BoardError> {
        let threshold = self.params.report_threshold;
        let mut crossed = false;
        let record = self.store.update_post(id, &mut |post| {
            if !post.status.accepts_engagement() {
                return Err(BoardError::NotFound("post".into()));
            }
            let before = post.status;
            let after = moderation::record_report(post, threshold);
            crossed = before == PostStatus::Active && after == PostStatus::Hidden;
            Ok(())
        })?;
        if crossed {
            info!(id = %record.id, reports = record.reports, "post hidden by report threshold");
        }
        Ok(record.status)
    }

    /// Append a comment. Guests and members alike.
    pub fn add_comment(
        &self,
        actor: &Actor,
        id: PostId,
        content: &str,
        now: Timestamp,
    ) -> Result<PostView, BoardError> {
        let content = self.checked_content(content, "comment")?;
        let viewer = self.fingerprint_of(actor);
        let account = actor.account.clone();

        let record = self.store.update_post(id, &mut |post| {
            if !post.status.accepts_engagement() {
                return Err(BoardError::NotFound("post".into()));
            }
            post.comments.push(CommentRecord {
                content: content.clone(),
                owner: viewer,
                author: account.clone(),
                created_at: now,
            });
            Ok(())
        })?;
        Ok(PostView::project(&record, viewer, actor.account.as_ref()))
    }

    /// Owner-only edit of content and/or category.
    pub fn edit_post(
        &self,
        actor: &Actor,
        id: PostId,
        content: Option<&str>,
        category: Option<&str>,
    ) -> Result<PostView, BoardError> {
        let new_content = content.map(|c| self.checked_content(c, "content")).transpose()?;
        let new_category = category.map(|c| self.checked_category(c)).transpose()?;
        let viewer = self.fingerprint_of(actor);

        let record = self.store.update_post(id, &mut |post| {
            if !post.status.accepts_engagement() {
                return Err(BoardError::NotFound("post".into()));
            }
            if post.owner != viewer {
                return Err(BoardError::Forbidden("post".into()));
            }
            if let Some(content) = &new_content {
                post.content = content.clone();
            }
            if let Some(category) = &new_category {
                post.category = category.clone();
            }
            Ok(())
        })?;
        Ok(PostView::project(&record, viewer, actor.account.as_ref()))
    }

    /// Delete a post: its owner or a moderator.
    ///
    /// Owners remove their record outright. Moderator takedowns keep the
    /// record under the terminal `deleted` status for audit; it reads as
    /// missing everywhere else.
    pub fn delete_post(&self, actor: &Actor, id: PostId) -> Result<(), BoardError> {
        if actor.moderator {
            self.store
                .update_post(id, &mut |post| moderation::delete(post))?;
            info!(%id, "post deleted by moderator");
            return Ok(());
        }
        let viewer = self.fingerprint_of(actor);
        let record = self.store.get_post(id)?;
        if !record.status.accepts_engagement() {
            return Err(BoardError::NotFound("post".into()));
        }
        if record.owner != viewer {
            return Err(BoardError::Forbidden("post".into()));
        }
        self.store.remove_post(id)?;
        info!(%id, "post removed by owner");
        Ok(())
    }

    /// Moderator action: bring a hidden post back to the feed.
    pub fn restore_post(&self, actor: &Actor, id: PostId) -> Result<PostView, BoardError> {
        if !actor.moderator {
            return Err(BoardError::Forbidden("post".into()));
        }
        let record = self
            .store
            .update_post(id, &mut |post| moderation::restore(post))?;
        info!(%id, "post restored by moderator");
        Ok(PostView::project(
            &record,
            self.fingerprint_of(actor),
            actor.account.as_ref(),
        ))
    }

    // ── Poll operations ──────────────────────────────────────────────────

    /// Create a poll owned by the caller's fingerprint.
    pub fn create_poll(
        &self,
        actor: &Actor,
        question: &str,
        option_texts: &[String],
        duration_hours: Option<u64>,
        now: Timestamp,
    ) -> Result<PollView, BoardError> {
        let question = self.checked_content(question, "question")?;
        if option_texts.len() < self.params.min_poll_options {
            return Err(BoardError::Invalid(format!(
                "a poll needs at least {} options",
                self.params.min_poll_options
            )));
        }
        let mut options = Vec::with_capacity(option_texts.len());
        for text in option_texts {
            let clean = sanitize(text);
            if clean.is_empty() {
                return Err(BoardError::Invalid("poll options cannot be empty".into()));
            }
            options.push(clean);
        }
        let hours = duration_hours.unwrap_or(self.params.default_poll_duration_hours);
        let owner = self.fingerprint_of(actor);

        let record = self.store.insert_poll(PollDraft {
            question,
            option_texts: options,
            expires_at: now.plus_secs(hours.saturating_mul(3600)),
            owner,
            created_at: now,
        })?;
        debug!(id = %record.id, options = record.options.len(), "poll created");
        Ok(PollView::project(&record, owner))
    }

    /// All polls, newest first, viewer-relative.
    pub fn list_polls(&self, actor: &Actor) -> Result<Vec<PollView>, BoardError> {
        let viewer = self.fingerprint_of(actor);
        let mut records = self.store.iter_polls()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records
            .iter()
            .map(|r| PollView::project(r, viewer))
            .collect())
    }

    /// Cast the caller's single, irrevocable poll vote.
    ///
    /// Open to any actor that can be fingerprinted — members vote under
    /// their account-derived fingerprint, guests under the network one.
    pub fn vote_poll(
        &self,
        actor: &Actor,
        id: PollId,
        option: OptionId,
        now: Timestamp,
    ) -> Result<PollView, BoardError> {
        let viewer = self.fingerprint_of(actor);
        let record = self
            .store
            .update_poll(id, &mut |poll| polls::cast_vote(poll, viewer, option, now))?;
        debug!(id = %record.id, %option, "poll vote recorded");
        Ok(PollView::project(&record, viewer))
    }

    /// Owner-only text edit; counters and voters are untouchable.
    pub fn edit_poll(
        &self,
        actor: &Actor,
        id: PollId,
        question: Option<&str>,
        option_texts: Option<&[String]>,
    ) -> Result<PollView, BoardError> {
        let new_question = question
            .map(|q| self.checked_content(q, "question"))
            .transpose()?;
        let new_options = match option_texts {
            Some(texts) => {
                let mut cleaned = Vec::with_capacity(texts.len());
                for text in texts {
                    let clean = sanitize(text);
                    if clean.is_empty() {
                        return Err(BoardError::Invalid("poll options cannot be empty".into()));
                    }
                    cleaned.push(clean);
                }
                Some(cleaned)
            }
            None => None,
        };
        let viewer = self.fingerprint_of(actor);

        let record = self.store.update_poll(id, &mut |poll| {
            polls::edit_poll(poll, viewer, new_question.clone(), new_options.clone())
        })?;
        Ok(PollView::project(&record, viewer))
    }

    /// Moderator action: remove a poll entirely.
    pub fn delete_poll(&self, actor: &Actor, id: PollId) -> Result<(), BoardError> {
        if !actor.moderator {
            return Err(BoardError::Forbidden("poll".into()));
        }
        self.store.remove_poll(id)?;
        info!(%id, "poll removed by moderator");
        Ok(())
    }
}
