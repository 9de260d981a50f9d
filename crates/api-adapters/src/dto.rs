//! Wire DTOs. Responses are camelCase to match the public API contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::{
    AppError, Case, CaseDraft, CaseFilter, CaseSort, CaseSummary, Comment, Page, SearchStats,
    SiteStatistics, SortOrder, VisitStats, DEFAULT_PAGE_SIZE,
};

// ── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCasesParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListCasesParams {
    pub fn page(&self) -> Page {
        Page::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    pub fn filter(&self) -> Result<CaseFilter, AppError> {
        let category = match self.category.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse()?),
            _ => None,
        };
        // unknown sort keys fall back to the default rather than erroring,
        // so stale links keep working
        let sort = match self.sort_by.as_deref() {
            Some("updatedAt") => CaseSort::UpdatedAt,
            Some("amount") => CaseSort::Amount,
            Some("title") => CaseSort::Title,
            _ => CaseSort::CreatedAt,
        };
        let order = match self.sort_order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        Ok(CaseFilter {
            category,
            search: self.search.clone(),
            sort,
            order,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    pub category: String,
    pub amount: Option<i64>,
    pub content: String,
    pub region: Option<String>,
    pub tip: Option<String>,
}

impl CreateCaseRequest {
    pub fn into_draft(self) -> Result<CaseDraft, AppError> {
        Ok(CaseDraft {
            title: self.title,
            category: self.category.parse()?,
            amount: self.amount,
            content: self.content,
            region: self.region,
            tip: self.tip,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCaseRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub amount: Option<i64>,
    pub content: Option<String>,
    pub region: Option<String>,
    pub tip: Option<String>,
}

impl UpdateCaseRequest {
    pub fn into_update(self) -> Result<domains::CaseUpdate, AppError> {
        Ok(domains::CaseUpdate {
            title: self.title,
            category: self.category.map(|c| c.parse()).transpose()?,
            amount: self.amount,
            content: self.content,
            region: self.region,
            tip: self.tip,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub nickname: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct LogSearchRequest {
    pub query: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodParams {
    pub period: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogVisitRequest {
    pub page: Option<String>,
    pub referrer: Option<String>,
}

// ── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub amount: Option<i64>,
    pub content: String,
    pub region: Option<String>,
    pub tip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Case> for CaseDto {
    fn from(case: Case) -> Self {
        Self {
            id: case.id,
            title: case.title,
            slug: case.slug,
            category: case.category.as_str().to_string(),
            amount: case.amount,
            content: case.content,
            region: case.region,
            tip: case.tip,
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseSummaryDto {
    #[serde(flatten)]
    pub case: CaseDto,
    pub comment_count: i64,
    pub like_count: i64,
}

impl From<CaseSummary> for CaseSummaryDto {
    fn from(summary: CaseSummary) -> Self {
        Self {
            case: summary.case.into(),
            comment_count: summary.comment_count,
            like_count: summary.like_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    pub case_id: Uuid,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            case_id: comment.case_id,
            nickname: comment.nickname,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetailDto {
    #[serde(flatten)]
    pub summary: CaseSummaryDto,
    pub comments: Vec<CommentDto>,
}

impl CaseDetailDto {
    pub fn new(summary: CaseSummary, comments: Vec<Comment>) -> Self {
        Self {
            summary: summary.into(),
            comments: comments.into_iter().map(CommentDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CaseListResponse {
    pub cases: Vec<CaseSummaryDto>,
    pub pagination: PaginationDto,
}

impl CaseListResponse {
    pub fn new(items: Vec<CaseSummary>, total: i64, page: Page) -> Self {
        Self {
            cases: items.into_iter().map(CaseSummaryDto::from).collect(),
            pagination: PaginationDto {
                page: page.page(),
                limit: page.limit(),
                total,
                total_pages: page.total_pages(total),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeStatusResponse {
    pub liked: bool,
    pub total_likes: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStatsResponse {
    pub period: &'static str,
    pub total_searches: i64,
    pub unique_queries: i64,
    pub top_searches: Vec<QueryCountDto>,
    pub recent_searches: Vec<RecentSearchDto>,
}

#[derive(Debug, Serialize)]
pub struct QueryCountDto {
    pub query: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSearchDto {
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl SearchStatsResponse {
    pub fn new(period: &'static str, stats: SearchStats) -> Self {
        Self {
            period,
            total_searches: stats.total_searches,
            unique_queries: stats.unique_queries,
            top_searches: stats
                .top_searches
                .into_iter()
                .map(|t| QueryCountDto {
                    query: t.query,
                    count: t.count,
                })
                .collect(),
            recent_searches: stats
                .recent_searches
                .into_iter()
                .map(|r| RecentSearchDto {
                    query: r.query,
                    created_at: r.created_at,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitStatsResponse {
    pub period: &'static str,
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub page_stats: Vec<PageVisitsDto>,
}

#[derive(Debug, Serialize)]
pub struct PageVisitsDto {
    pub page: String,
    pub visits: i64,
}

impl VisitStatsResponse {
    pub fn new(period: &'static str, stats: VisitStats) -> Self {
        Self {
            period,
            total_visits: stats.total_visits,
            unique_visitors: stats.unique_visitors,
            page_stats: stats
                .page_stats
                .into_iter()
                .map(|p| PageVisitsDto {
                    page: p.page,
                    visits: p.visits,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_cases: i64,
    pub cases_by_category: Vec<CategoryCountDto>,
    pub amount_stats: AmountStatsDto,
    pub total_comments: i64,
    pub total_likes: i64,
    pub recent_cases: i64,
    pub cases_by_region: Vec<RegionCountDto>,
}

#[derive(Debug, Serialize)]
pub struct CategoryCountDto {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountStatsDto {
    pub total_amount: i64,
    pub average_amount: f64,
    pub min_amount: i64,
    pub max_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct RegionCountDto {
    pub region: String,
    pub count: i64,
}

impl From<SiteStatistics> for StatisticsResponse {
    fn from(stats: SiteStatistics) -> Self {
        Self {
            total_cases: stats.total_cases,
            cases_by_category: stats
                .cases_by_category
                .into_iter()
                .map(|c| CategoryCountDto {
                    category: c.category.as_str().to_string(),
                    count: c.count,
                })
                .collect(),
            amount_stats: AmountStatsDto {
                total_amount: stats.amount_stats.total_amount,
                average_amount: stats.amount_stats.average_amount,
                min_amount: stats.amount_stats.min_amount,
                max_amount: stats.amount_stats.max_amount,
            },
            total_comments: stats.total_comments,
            total_likes: stats.total_likes,
            recent_cases: stats.recent_cases,
            cases_by_region: stats
                .cases_by_region
                .into_iter()
                .map(|r| RegionCountDto {
                    region: r.region,
                    count: r.count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cases: i64,
    pub comments: i64,
    pub likes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::Category;

    #[test]
    fn list_params_parse_sort_and_category() {
        let params = ListCasesParams {
            category: Some("smishing".to_string()),
            sort_by: Some("amount".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.category, Some(Category::Smishing));
        assert_eq!(filter.sort, CaseSort::Amount);
        assert_eq!(filter.order, SortOrder::Asc);
    }

    #[test]
    fn unknown_sort_key_falls_back_to_created_at() {
        let params = ListCasesParams {
            sort_by: Some("likeCount".to_string()),
            ..Default::default()
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.sort, CaseSort::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
    }

    #[test]
    fn bad_category_is_a_validation_error() {
        let params = ListCasesParams {
            category: Some("carrier-pigeon".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.filter(), Err(AppError::Validation(_))));
    }

    #[test]
    fn summary_serializes_flat_with_camel_case() {
        let case = Case {
            id: Uuid::now_v7(),
            title: "Parcel text scam".to_string(),
            slug: "smishing-parcel-text-scam-case".to_string(),
            category: Category::Smishing,
            amount: Some(90_000),
            content: "x".repeat(30),
            region: None,
            tip: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let dto = CaseSummaryDto::from(CaseSummary {
            case,
            comment_count: 2,
            like_count: 5,
        });
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["category"], "smishing");
        assert_eq!(value["commentCount"], 2);
        assert_eq!(value["likeCount"], 5);
        assert!(value["createdAt"].is_string());
    }
}
