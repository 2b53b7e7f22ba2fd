use crate::CurrentUser;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use circles_app::domain::{
    sort_posts, AggregateAudit, Arrow, ConfirmedVote, NewPost, Post, SortOrder, VoteState,
};
use circles_app::AppContext;
use circles_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    sort: Option<String>,
    circle: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteStatus {
    vote_state: VoteState,
}

#[derive(Debug, Deserialize)]
pub struct CastRequest {
    previous: VoteState,
    requested: VoteState,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    arrow: Arrow,
}

pub async fn list_posts(
    State(ctx): State<AppContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let order = match query.sort.as_deref() {
        Some(sort) => sort.parse()?,
        None => SortOrder::default(),
    };
    let posts = ctx.store().list_posts(query.circle).await?;
    Ok(Json(sort_posts(posts, order, chrono::Utc::now())))
}

pub async fn create_post(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Json(new_post): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let user_id = user.require()?;
    if new_post.title.trim().is_empty() || new_post.circle.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "title and circle are required".to_string(),
        ));
    }

    let post = ctx.store().create_post(new_post, Some(user_id)).await?;
    tracing::info!(post_id = %post.id, circle = %post.circle, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, AppError> {
    Ok(Json(ctx.store().find_post(id).await?))
}

/// Never fails: anonymous viewers and unreadable records both read as neutral.
pub async fn get_vote(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Json<VoteStatus> {
    let vote_state = match user.0 {
        Some(user_id) => ctx.votes.current_state(user_id, id).await,
        None => VoteState::Neutral,
    };
    Json(VoteStatus { vote_state })
}

/// `previous` must match the stored vote, otherwise 409 and nothing changes.
pub async fn cast_vote(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CastRequest>,
) -> Result<Json<ConfirmedVote>, AppError> {
    let user_id = user.require()?;
    ctx.store().find_post(id).await?;
    let confirmed = ctx
        .votes
        .execute_checked(user_id, id, request.previous, request.requested)
        .await?;
    Ok(Json(confirmed))
}

pub async fn click_arrow(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ConfirmedVote>, AppError> {
    let user_id = user.require()?;
    ctx.store().find_post(id).await?;
    let confirmed = ctx.votes.cast_for(user_id, id, request.arrow).await?;
    Ok(Json(confirmed))
}

pub async fn audit_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<AggregateAudit>, AppError> {
    ctx.store().find_post(id).await?;
    Ok(Json(ctx.votes.audit(id).await?))
}
