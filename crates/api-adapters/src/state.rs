//! State shared across all request handlers.

use std::sync::Arc;

use services::{AnalyticsService, CaseService, EngagementService, StatsService};

use crate::metrics::HttpMetrics;

/// Public identity of the deployment, used by the sitemap and robots
/// endpoints.
#[derive(Debug, Clone)]
pub struct SiteMeta {
    pub base_url: String,
    pub name: String,
}

#[derive(Clone)]
pub struct AppState {
    pub cases: Arc<CaseService>,
    pub engagement: Arc<EngagementService>,
    pub analytics: Arc<AnalyticsService>,
    pub stats: Arc<StatsService>,
    pub site: SiteMeta,
    pub metrics: Arc<HttpMetrics>,
}
