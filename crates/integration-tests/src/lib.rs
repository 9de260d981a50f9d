//! Shared plumbing for the HTTP-level tests: mock wiring into the real
//! router plus fixtures and a oneshot request helper.

pub mod fixtures;
pub mod http;

use std::sync::Arc;

use axum::Router;

use api_adapters::{router, AppState, HttpMetrics, SiteMeta};
use domains::{
    CaseRepo, MockAnalyticsRepo, MockCaseRepo, MockCommentRepo, MockLikeRepo, MockStatsRepo,
};
use services::{AnalyticsService, CaseService, EngagementService, StatsService};

pub const BASE_URL: &str = "https://phishwatch.example";

/// One mock per port; set expectations, then build the router.
#[derive(Default)]
pub struct MockSet {
    pub cases: MockCaseRepo,
    pub comments: MockCommentRepo,
    pub likes: MockLikeRepo,
    pub analytics: MockAnalyticsRepo,
    pub stats: MockStatsRepo,
}

pub fn router_with(mocks: MockSet) -> Router {
    let case_repo: Arc<dyn CaseRepo> = Arc::new(mocks.cases);

    let state = AppState {
        cases: Arc::new(CaseService::new(case_repo.clone())),
        engagement: Arc::new(EngagementService::new(
            case_repo,
            Arc::new(mocks.comments),
            Arc::new(mocks.likes),
        )),
        analytics: Arc::new(AnalyticsService::new(Arc::new(mocks.analytics))),
        stats: Arc::new(StatsService::new(Arc::new(mocks.stats), None)),
        site: SiteMeta {
            base_url: BASE_URL.to_string(),
            name: "Phishwatch".to_string(),
        },
        metrics: Arc::new(HttpMetrics::new()),
    };
    router(state)
}
