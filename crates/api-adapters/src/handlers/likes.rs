//! Like toggle and status, keyed by the requester's IP.

use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::dto::{LikeStatusResponse, LikeToggleResponse};
use crate::error::ApiResult;
use crate::extract::ClientInfo;
use crate::state::AppState;

pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    client: ClientInfo,
) -> ApiResult<Json<LikeToggleResponse>> {
    let liked = state.engagement.toggle_like(id, &client.ip).await?;
    let message = if liked { "like added" } else { "like removed" };
    Ok(Json(LikeToggleResponse { liked, message }))
}

pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    client: ClientInfo,
) -> ApiResult<Json<LikeStatusResponse>> {
    let status = state.engagement.like_status(id, &client.ip).await?;
    Ok(Json(LikeStatusResponse {
        liked: status.liked,
        total_likes: status.total_likes,
    }))
}
