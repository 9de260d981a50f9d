//! The site-statistics endpoint.

use axum::extract::State;
use axum::Json;

use crate::dto::StatisticsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn site(State(state): State<AppState>) -> ApiResult<Json<StatisticsResponse>> {
    let stats = state.stats.site_statistics().await?;
    Ok(Json(stats.into()))
}
