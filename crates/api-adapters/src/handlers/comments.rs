//! Comment handlers, always scoped under their case.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::dto::{CommentDto, CreateCommentRequest, UpdateCommentRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentDto>)> {
    let comment = state
        .engagement
        .add_comment(id, &body.nickname, &body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateCommentRequest>,
) -> ApiResult<Json<CommentDto>> {
    let comment = state
        .engagement
        .edit_comment(id, comment_id, &body.content)
        .await?;
    Ok(Json(comment.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<serde_json::Value>> {
    state.engagement.remove_comment(id, comment_id).await?;
    Ok(Json(json!({ "success": true })))
}
