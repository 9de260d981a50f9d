//! Search and visit analytics: write-side logging plus the read-side
//! aggregates and suggestion lookup.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::{
    AnalyticsRepo, AppError, Result, SearchQuery, SearchStats, SiteVisit, StatsPeriod, VisitStats,
};

pub const SEARCH_MIN_CHARS: usize = 2;
pub const SUGGESTION_LIMIT: i64 = 8;
pub const TOP_SEARCHES_DEFAULT: i64 = 10;
const TOP_SEARCHES_MAX: i64 = 50;

pub struct AnalyticsService {
    repo: Arc<dyn AnalyticsRepo>,
}

impl AnalyticsService {
    pub fn new(repo: Arc<dyn AnalyticsRepo>) -> Self {
        Self { repo }
    }

    pub async fn log_search(
        &self,
        query: &str,
        ip_address: &str,
        user_agent: Option<&str>,
    ) -> Result<()> {
        let query = query.trim();
        if query.chars().count() < SEARCH_MIN_CHARS {
            return Err(AppError::Validation(format!(
                "search query must be at least {SEARCH_MIN_CHARS} characters"
            )));
        }

        let entry = SearchQuery {
            id: Uuid::now_v7(),
            query: query.to_string(),
            ip_address: ip_address.to_string(),
            user_agent: user_agent.map(str::to_string),
            created_at: Utc::now(),
        };
        self.repo.insert_search(&entry).await
    }

    /// Suggestions for a partial query; empty below the minimum length
    /// without touching the repository.
    pub async fn suggestions(&self, q: &str) -> Result<Vec<String>> {
        let q = q.trim();
        if q.chars().count() < SEARCH_MIN_CHARS {
            return Ok(Vec::new());
        }
        self.repo.suggestions(q, SUGGESTION_LIMIT).await
    }

    pub async fn search_stats(
        &self,
        period: StatsPeriod,
        limit: Option<i64>,
    ) -> Result<SearchStats> {
        let limit = limit
            .unwrap_or(TOP_SEARCHES_DEFAULT)
            .clamp(1, TOP_SEARCHES_MAX);
        self.repo
            .search_stats(period.cutoff(Utc::now()), limit)
            .await
    }

    pub async fn log_visit(
        &self,
        page: Option<&str>,
        referrer: Option<&str>,
        ip_address: &str,
        user_agent: Option<&str>,
    ) -> Result<()> {
        let page = match page.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => "unknown",
        };

        let visit = SiteVisit {
            id: Uuid::now_v7(),
            page: page.to_string(),
            referrer: referrer
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            ip_address: ip_address.to_string(),
            user_agent: user_agent.map(str::to_string),
            created_at: Utc::now(),
        };
        self.repo.insert_visit(&visit).await
    }

    pub async fn visit_stats(&self, period: StatsPeriod) -> Result<VisitStats> {
        self.repo.visit_stats(period.cutoff(Utc::now())).await
    }
}
