//! Postgres implementation of search/visit analytics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use domains::{
    AnalyticsRepo, PageVisits, QueryCount, RecentSearch, Result, SearchQuery, SearchStats,
    SiteVisit, VisitStats,
};

use super::{db_err, escape_like};

/// How many of the latest queries the search stats carry.
const RECENT_SEARCH_LIMIT: i64 = 10;

pub struct PgAnalyticsRepo {
    pool: PgPool,
}

impl PgAnalyticsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepo for PgAnalyticsRepo {
    async fn insert_search(&self, entry: &SearchQuery) -> Result<()> {
        sqlx::query(
            "INSERT INTO search_queries (id, query, ip_address, user_agent, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.id)
        .bind(&entry.query)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn search_stats(&self, since: Option<DateTime<Utc>>, limit: i64) -> Result<SearchStats> {
        let top: Vec<(String, i64)> = sqlx::query_as(
            "SELECT query, COUNT(*) AS uses FROM search_queries \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             GROUP BY query ORDER BY uses DESC, query ASC LIMIT $2",
        )
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let total_searches: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM search_queries \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let unique_queries: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT query) FROM search_queries \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let recent: Vec<(String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT query, created_at FROM search_queries \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(since)
        .bind(RECENT_SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(SearchStats {
            total_searches,
            unique_queries,
            top_searches: top
                .into_iter()
                .map(|(query, count)| QueryCount { query, count })
                .collect(),
            recent_searches: recent
                .into_iter()
                .map(|(query, created_at)| RecentSearch { query, created_at })
                .collect(),
        })
    }

    async fn suggestions(&self, q: &str, limit: i64) -> Result<Vec<String>> {
        let escaped = escape_like(q);
        let contains = format!("%{escaped}%");
        let prefix = format!("{escaped}%");

        // exact match first, then prefix matches, then by how often the
        // query was searched
        sqlx::query_scalar(
            "SELECT query FROM ( \
                 SELECT query, COUNT(*) AS uses FROM search_queries \
                 WHERE query ILIKE $2 GROUP BY query \
             ) AS matches \
             ORDER BY (lower(query) = lower($1)) DESC, (query ILIKE $3) DESC, \
                      uses DESC, query ASC \
             LIMIT $4",
        )
        .bind(q)
        .bind(contains)
        .bind(prefix)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn insert_visit(&self, visit: &SiteVisit) -> Result<()> {
        sqlx::query(
            "INSERT INTO site_visits (id, page, referrer, ip_address, user_agent, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(visit.id)
        .bind(&visit.page)
        .bind(&visit.referrer)
        .bind(&visit.ip_address)
        .bind(&visit.user_agent)
        .bind(visit.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn visit_stats(&self, since: Option<DateTime<Utc>>) -> Result<VisitStats> {
        let total_visits: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM site_visits \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let unique_visitors: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT ip_address) FROM site_visits \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let pages: Vec<(String, i64)> = sqlx::query_as(
            "SELECT page, COUNT(*) AS visits FROM site_visits \
             WHERE ($1::timestamptz IS NULL OR created_at >= $1) \
             GROUP BY page ORDER BY visits DESC, page ASC",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(VisitStats {
            total_visits,
            unique_visitors,
            page_stats: pages
                .into_iter()
                .map(|(page, visits)| PageVisits { page, visits })
                .collect(),
        })
    }
}
