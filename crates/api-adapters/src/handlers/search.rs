//! Search suggestions, logging and aggregates.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::json;

use domains::StatsPeriod;

use crate::dto::{LogSearchRequest, PeriodParams, SearchStatsResponse, SuggestionParams};
use crate::error::ApiResult;
use crate::extract::ClientInfo;
use crate::state::AppState;

pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.analytics.suggestions(&params.q).await?))
}

pub async fn log(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(body): Json<LogSearchRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .analytics
        .log_search(&body.query, &client.ip, client.user_agent.as_deref())
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Json<SearchStatsResponse>> {
    let period = StatsPeriod::parse(params.period.as_deref().unwrap_or("7d"));
    let stats = state.analytics.search_stats(period, params.limit).await?;
    Ok(Json(SearchStatsResponse::new(period.as_str(), stats)))
}
