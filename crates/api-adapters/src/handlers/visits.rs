//! Page-visit logging and aggregates.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::json;

use domains::StatsPeriod;

use crate::dto::{LogVisitRequest, PeriodParams, VisitStatsResponse};
use crate::error::ApiResult;
use crate::extract::ClientInfo;
use crate::state::AppState;

pub async fn log(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(body): Json<LogVisitRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .analytics
        .log_visit(
            body.page.as_deref(),
            body.referrer.as_deref(),
            &client.ip,
            client.user_agent.as_deref(),
        )
        .await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> ApiResult<Json<VisitStatsResponse>> {
    let period = StatsPeriod::parse(params.period.as_deref().unwrap_or("7d"));
    let stats = state.analytics.visit_stats(period).await?;
    Ok(Json(VisitStatsResponse::new(period.as_str(), stats)))
}
