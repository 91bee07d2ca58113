//! Request handlers and their wire types.
//!
//! Every handler follows the same shape: resolve the caller, delegate to
//! the engine, let [`ApiError`](crate::ApiError) render failures.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use campustalk_engine::{FeedQuery, FeedSort, PollView, PostPage, PostView};
use campustalk_store::{PollStore, PostStore};
use campustalk_types::{OptionId, PollId, PostId, Timestamp, VoteKind};

use crate::auth::resolve_actor;
use crate::error::ApiError;
use crate::server::AppState;

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub content: String,
    pub category: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditPostRequest {
    pub content: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostVoteRequest {
    pub kind: VoteKind,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub duration_hours: Option<u64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditPollRequest {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollVoteRequest {
    pub option: u32,
}

#[derive(Deserialize)]
pub struct FeedParams {
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl FeedParams {
    fn into_query(self) -> FeedQuery {
        FeedQuery {
            category: self.category,
            sort: match self.sort.as_deref() {
                Some(s) if s.eq_ignore_ascii_case("popular") => FeedSort::Popular,
                _ => FeedSort::Newest,
            },
            page: self.page.unwrap_or(1),
            limit: self.limit,
        }
    }
}

// ── Post handlers ──────────────────────────────────────────────────────

pub async fn list_posts<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Query(params): Query<FeedParams>,
) -> Result<Json<PostPage>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let page = state.engine.list_posts(&actor, &params.into_query())?;
    Ok(Json(page))
}

pub async fn create_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostView>), ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state
        .engine
        .create_post(&actor, &req.content, &req.category, Timestamp::now())?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<PostView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.get_post(&actor, PostId::new(id))?;
    Ok(Json(view))
}

pub async fn edit_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<EditPostRequest>,
) -> Result<Json<PostView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.edit_post(
        &actor,
        PostId::new(id),
        req.content.as_deref(),
        req.category.as_deref(),
    )?;
    Ok(Json(view))
}

pub async fn delete_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    state.engine.delete_post(&actor, PostId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_comment<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<PostView>), ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state
        .engine
        .add_comment(&actor, PostId::new(id), &req.content, Timestamp::now())?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn vote_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<PostVoteRequest>,
) -> Result<Json<PostView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.vote_post(&actor, PostId::new(id), req.kind)?;
    Ok(Json(view))
}

pub async fn report_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    // Guests may report, but a bad token is still a bad token.
    resolve_actor(&headers, state.identity.as_ref())?;
    let status = state.engine.report_post(PostId::new(id))?;
    Ok(Json(json!({ "status": status })))
}

pub async fn restore_post<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<Json<PostView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.restore_post(&actor, PostId::new(id))?;
    Ok(Json(view))
}

// ── Poll handlers ──────────────────────────────────────────────────────

pub async fn list_polls<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<Json<Vec<PollView>>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    Ok(Json(state.engine.list_polls(&actor)?))
}

pub async fn create_poll<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(req): Json<CreatePollRequest>,
) -> Result<(StatusCode, Json<PollView>), ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.create_poll(
        &actor,
        &req.question,
        &req.options,
        req.duration_hours,
        Timestamp::now(),
    )?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn vote_poll<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<PollVoteRequest>,
) -> Result<Json<PollView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.vote_poll(
        &actor,
        PollId::new(id),
        OptionId::new(req.option),
        Timestamp::now(),
    )?;
    Ok(Json(view))
}

pub async fn edit_poll<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(req): Json<EditPollRequest>,
) -> Result<Json<PollView>, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    let view = state.engine.edit_poll(
        &actor,
        PollId::new(id),
        req.question.as_deref(),
        req.options.as_deref(),
    )?;
    Ok(Json(view))
}

pub async fn delete_poll<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError>
where
    S: PostStore + PollStore + 'static,
{
    let actor = resolve_actor(&headers, state.identity.as_ref())?;
    state.engine.delete_poll(&actor, PollId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}
