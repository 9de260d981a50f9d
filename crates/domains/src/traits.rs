//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be used by the binary.
//! All methods return [`crate::error::Result`] so services can map
//! storage failures uniformly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Case, CaseFilter, CasePage, CaseSummary, Category, Comment, Like, Page, SearchQuery,
    SearchStats, SiteStatistics, SiteVisit, SitemapEntry, VisitStats,
};

/// Persistence contract for cases.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CaseRepo: Send + Sync {
    async fn insert(&self, case: &Case) -> Result<()>;
    async fn update(&self, case: &Case) -> Result<()>;
    /// Returns false when no row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Case>>;
    async fn slug_exists(&self, slug: &str) -> Result<bool>;

    /// Single case with its engagement counts.
    async fn find_summary(&self, id: Uuid) -> Result<Option<CaseSummary>>;
    async fn find_summary_by_slug(&self, slug: &str) -> Result<Option<CaseSummary>>;

    /// Filtered, sorted, paginated listing with counts.
    async fn list(&self, filter: &CaseFilter, page: Page) -> Result<CasePage>;

    /// Cases sharing `category` or `region`, newest first, excluding the
    /// given ids. Passing neither matches every other case (used for
    /// backfill).
    async fn related<'a>(
        &self,
        exclude: &[Uuid],
        category: Option<Category>,
        region: Option<&'a str>,
        limit: i64,
    ) -> Result<Vec<CaseSummary>>;

    /// Slug + last update of every case, for the sitemap.
    async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>>;

    async fn count(&self) -> Result<i64>;
}

/// Persistence contract for comments.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<()>;
    /// Updates a comment scoped to its case; `None` when no such comment.
    async fn update_content(
        &self,
        case_id: Uuid,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>>;
    async fn delete(&self, case_id: Uuid, comment_id: Uuid) -> Result<bool>;
    /// Comments for a case, newest first.
    async fn list_for_case(&self, case_id: Uuid) -> Result<Vec<Comment>>;
    async fn count(&self) -> Result<i64>;
}

/// Persistence contract for likes. The (case, IP) pair is unique.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait LikeRepo: Send + Sync {
    /// Returns false when the pair already existed (insert ignored).
    async fn insert(&self, like: &Like) -> Result<bool>;
    /// Returns true when a like was removed.
    async fn remove(&self, case_id: Uuid, ip_address: &str) -> Result<bool>;
    async fn exists(&self, case_id: Uuid, ip_address: &str) -> Result<bool>;
    async fn count_for_case(&self, case_id: Uuid) -> Result<i64>;
    async fn count(&self) -> Result<i64>;
}

/// Search and visit logging plus their aggregates.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AnalyticsRepo: Send + Sync {
    async fn insert_search(&self, entry: &SearchQuery) -> Result<()>;
    /// Aggregate search stats since `since` (entire history when `None`),
    /// with the top `limit` queries.
    async fn search_stats(&self, since: Option<DateTime<Utc>>, limit: i64) -> Result<SearchStats>;
    /// Logged queries matching `q`, ranked exact > prefix > frequency.
    async fn suggestions(&self, q: &str, limit: i64) -> Result<Vec<String>>;

    async fn insert_visit(&self, visit: &SiteVisit) -> Result<()>;
    async fn visit_stats(&self, since: Option<DateTime<Utc>>) -> Result<VisitStats>;
}

/// The site-wide statistics aggregate in one round of queries.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait StatsRepo: Send + Sync {
    async fn collect(&self, recent_cutoff: DateTime<Utc>) -> Result<SiteStatistics>;
}

/// Key-value cache for the statistics aggregate.
///
/// Implementations should treat failures as soft: the service logs and
/// falls back to the repository.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait StatsCache: Send + Sync {
    async fn get(&self) -> Result<Option<SiteStatistics>>;
    async fn put(&self, stats: &SiteStatistics, ttl_secs: u64) -> Result<()>;
}
