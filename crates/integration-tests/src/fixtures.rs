//! Canned domain values for the HTTP tests.

use chrono::Utc;
use uuid::Uuid;

use domains::slug;
use domains::{
    AmountStats, Case, CaseSummary, Category, CategoryCount, Comment, PageVisits, QueryCount,
    RecentSearch, RegionCount, SearchStats, SiteStatistics, VisitStats,
};

pub fn case(title: &str, category: Category) -> Case {
    let now = Utc::now();
    Case {
        id: Uuid::now_v7(),
        title: title.to_string(),
        slug: slug::base_slug(title, category),
        category,
        amount: Some(250_000),
        content: "The caller knew my name and bank and pushed hard for my PIN before \
                  I hung up."
            .to_string(),
        region: Some("Seoul".to_string()),
        tip: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn summary(case: Case) -> CaseSummary {
    CaseSummary {
        case,
        comment_count: 2,
        like_count: 5,
    }
}

pub fn comment(case_id: Uuid) -> Comment {
    let now = Utc::now();
    Comment {
        id: Uuid::now_v7(),
        case_id,
        nickname: "watchful".to_string(),
        content: "Same script was used on my parents last week.".to_string(),
        created_at: now,
        updated_at: now,
    }
}

pub fn search_stats() -> SearchStats {
    SearchStats {
        total_searches: 42,
        unique_queries: 17,
        top_searches: vec![QueryCount {
            query: "voice phishing".to_string(),
            count: 12,
        }],
        recent_searches: vec![RecentSearch {
            query: "parcel text".to_string(),
            created_at: Utc::now(),
        }],
    }
}

pub fn visit_stats() -> VisitStats {
    VisitStats {
        total_visits: 120,
        unique_visitors: 48,
        page_stats: vec![PageVisits {
            page: "/cases".to_string(),
            visits: 77,
        }],
    }
}

pub fn site_statistics() -> SiteStatistics {
    SiteStatistics {
        total_cases: 9,
        cases_by_category: vec![CategoryCount {
            category: Category::Smishing,
            count: 4,
        }],
        amount_stats: AmountStats {
            total_amount: 1_700_000,
            average_amount: 340_000.0,
            min_amount: 0,
            max_amount: 1_200_000,
        },
        total_comments: 13,
        total_likes: 21,
        recent_cases: 3,
        cases_by_region: vec![RegionCount {
            region: "Seoul".to_string(),
            count: 5,
        }],
    }
}
