//! Case CRUD, lookup and listing handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::dto::{
    CaseDetailDto, CaseDto, CaseListResponse, CaseSummaryDto, CreateCaseRequest, ListCasesParams,
    RelatedParams, UpdateCaseRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListCasesParams>,
) -> ApiResult<Json<CaseListResponse>> {
    let filter = params.filter()?;
    let page = params.page();
    let result = state.cases.list(filter, page).await?;
    Ok(Json(CaseListResponse::new(result.items, result.total, page)))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCaseRequest>,
) -> ApiResult<(StatusCode, Json<CaseDto>)> {
    let case = state.cases.create(body.into_draft()?).await?;
    Ok((StatusCode::CREATED, Json(case.into())))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CaseDetailDto>> {
    let summary = state.cases.get(id).await?;
    let comments = state.engagement.comments_for(id).await?;
    Ok(Json(CaseDetailDto::new(summary, comments)))
}

pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<CaseSummaryDto>> {
    let summary = state.cases.get_by_slug(&slug).await?;
    Ok(Json(summary.into()))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCaseRequest>,
) -> ApiResult<Json<CaseDto>> {
    let case = state.cases.update(id, body.into_update()?).await?;
    Ok(Json(case.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    state.cases.delete(id).await?;
    Ok(Json(json!({ "message": "case deleted" })))
}

pub async fn related(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RelatedParams>,
) -> ApiResult<Json<Vec<CaseSummaryDto>>> {
    let related = state.cases.related(id, params.limit).await?;
    Ok(Json(related.into_iter().map(CaseSummaryDto::from).collect()))
}
