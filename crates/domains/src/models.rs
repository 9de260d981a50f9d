//! # Domain Models
//!
//! These structs represent the core entities of Phishwatch.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// The closed set of phishing categories a case can belong to.
///
/// Wire values are kebab-case; `slug_keyword` carries the SEO term used
/// when building case slugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    VoicePhishing,
    Smishing,
    PhishingLink,
    SocialMedia,
    ReviewJobScam,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::VoicePhishing,
        Category::Smishing,
        Category::PhishingLink,
        Category::SocialMedia,
        Category::ReviewJobScam,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::VoicePhishing => "voice-phishing",
            Category::Smishing => "smishing",
            Category::PhishingLink => "phishing-link",
            Category::SocialMedia => "social-media",
            Category::ReviewJobScam => "review-job-scam",
            Category::Other => "other",
        }
    }

    /// SEO keyword prefixed to case slugs.
    pub fn slug_keyword(&self) -> &'static str {
        match self {
            Category::VoicePhishing => "voice-phishing",
            Category::Smishing => "smishing",
            Category::PhishingLink => "phishing-link",
            Category::SocialMedia => "social-media-phishing",
            Category::ReviewJobScam => "review-job-scam",
            Category::Other => "phishing-scam",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown category: {s}")))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted phishing-incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    /// URL-safe identifier derived from title and category, unique site-wide.
    pub slug: String,
    pub category: Category,
    /// Damage amount in won, when the victim disclosed one.
    pub amount: Option<i64>,
    pub content: String,
    pub region: Option<String>,
    /// Prevention advice attached by the submitter.
    pub tip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A case together with its engagement counts, as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case: Case,
    pub comment_count: i64,
    pub like_count: i64,
}

/// One page of a case listing plus the unpaginated total.
#[derive(Debug, Clone, PartialEq)]
pub struct CasePage {
    pub items: Vec<CaseSummary>,
    pub total: i64,
}

/// Validated payload for creating a case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseDraft {
    pub title: String,
    pub category: Category,
    pub amount: Option<i64>,
    pub content: String,
    pub region: Option<String>,
    pub tip: Option<String>,
}

/// Partial update of a case; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseUpdate {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub amount: Option<i64>,
    pub content: Option<String>,
    pub region: Option<String>,
    pub tip: Option<String>,
}

/// Sort key for case listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseSort {
    #[default]
    CreatedAt,
    UpdatedAt,
    Amount,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Listing filter; `search` matches title, category, content and region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub sort: CaseSort,
    pub order: SortOrder,
}

/// Pagination window, 1-based. Limits are clamped to `MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    limit: u32,
}

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    /// Number of pages needed for `total` rows at this page size.
    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit() - 1) / self.limit()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// A reader comment on a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub case_id: Uuid,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A per-IP engagement marker on a case. One per (case, IP) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub case_id: Uuid,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

/// A logged search, kept for suggestions and search analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub id: Uuid,
    pub query: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A logged page view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteVisit {
    pub id: Uuid,
    pub page: String,
    pub referrer: Option<String>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reporting window for search/visit analytics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsPeriod {
    Day,
    #[default]
    Week,
    Month,
    All,
}

impl StatsPeriod {
    /// Parses the wire form; anything unrecognized means the full history,
    /// matching how the read endpoints treat unknown periods.
    pub fn parse(s: &str) -> Self {
        match s {
            "1d" => StatsPeriod::Day,
            "7d" => StatsPeriod::Week,
            "30d" => StatsPeriod::Month,
            _ => StatsPeriod::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPeriod::Day => "1d",
            StatsPeriod::Week => "7d",
            StatsPeriod::Month => "30d",
            StatsPeriod::All => "all",
        }
    }

    /// Lower bound of the window, or `None` for the full history.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = match self {
            StatsPeriod::Day => 1,
            StatsPeriod::Week => 7,
            StatsPeriod::Month => 30,
            StatsPeriod::All => return None,
        };
        Some(now - chrono::Duration::days(days))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCount {
    pub query: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub query: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub total_searches: i64,
    pub unique_queries: i64,
    pub top_searches: Vec<QueryCount>,
    pub recent_searches: Vec<RecentSearch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageVisits {
    pub page: String,
    pub visits: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitStats {
    pub total_visits: i64,
    pub unique_visitors: i64,
    pub page_stats: Vec<PageVisits>,
}

/// Damage-amount aggregate over cases that disclosed an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AmountStats {
    pub total_amount: i64,
    pub average_amount: f64,
    pub min_amount: i64,
    pub max_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionCount {
    pub region: String,
    pub count: i64,
}

/// The site-wide aggregate served by the statistics endpoint.
///
/// Serialized as-is into the key-value cache, so field changes must stay
/// backward-compatible or bump the cache key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStatistics {
    pub total_cases: i64,
    pub cases_by_category: Vec<CategoryCount>,
    pub amount_stats: AmountStats,
    pub total_comments: i64,
    pub total_likes: i64,
    /// Cases created in the trailing seven days.
    pub recent_cases: i64,
    /// Top regions by case count, at most ten.
    pub cases_by_region: Vec<RegionCount>,
}

/// One case row of the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub slug: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_round_trips_through_wire_values() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
        assert!(Category::from_str("pharming").is_err());
    }

    #[test]
    fn category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::ReviewJobScam).unwrap();
        assert_eq!(json, "\"review-job-scam\"");
        let back: Category = serde_json::from_str("\"voice-phishing\"").unwrap();
        assert_eq!(back, Category::VoicePhishing);
    }

    #[test]
    fn page_clamps_and_computes_offsets() {
        let page = Page::new(0, 500);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), i64::from(MAX_PAGE_SIZE));
        assert_eq!(page.offset(), 0);

        let page = Page::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(21), 3);
        assert_eq!(page.total_pages(30), 3);
    }

    #[test]
    fn period_parsing_defaults_to_full_history() {
        assert_eq!(StatsPeriod::parse("1d"), StatsPeriod::Day);
        assert_eq!(StatsPeriod::parse("7d"), StatsPeriod::Week);
        assert_eq!(StatsPeriod::parse("30d"), StatsPeriod::Month);
        assert_eq!(StatsPeriod::parse("quarter"), StatsPeriod::All);
        assert!(StatsPeriod::All.cutoff(Utc::now()).is_none());

        let now = Utc::now();
        let cutoff = StatsPeriod::Week.cutoff(now).unwrap();
        assert_eq!(now - cutoff, chrono::Duration::days(7));
    }
}
