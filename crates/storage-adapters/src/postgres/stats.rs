//! Postgres implementation of the site-statistics aggregate.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use domains::{
    AmountStats, AppError, Category, CategoryCount, RegionCount, Result, SiteStatistics, StatsRepo,
};

use super::db_err;

const TOP_REGION_LIMIT: i64 = 10;

#[derive(sqlx::FromRow)]
struct AmountRow {
    total_amount: i64,
    average_amount: f64,
    min_amount: i64,
    max_amount: i64,
}

pub struct PgStatsRepo {
    pool: PgPool,
}

impl PgStatsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepo for PgStatsRepo {
    async fn collect(&self, recent_cutoff: DateTime<Utc>) -> Result<SiteStatistics> {
        let total_cases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cases")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) AS cases FROM cases \
             GROUP BY category ORDER BY cases DESC, category ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        let cases_by_category = by_category
            .into_iter()
            .map(|(category, count)| {
                let category = Category::from_str(&category).map_err(|_| {
                    AppError::Internal(format!("unknown category in store: {category}"))
                })?;
                Ok(CategoryCount { category, count })
            })
            .collect::<Result<Vec<_>>>()?;

        // aggregates only over cases that disclosed an amount; the casts
        // keep SUM/AVG out of NUMERIC
        let amount_row: AmountRow = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT AS total_amount, \
                    COALESCE(AVG(amount), 0)::DOUBLE PRECISION AS average_amount, \
                    COALESCE(MIN(amount), 0)::BIGINT AS min_amount, \
                    COALESCE(MAX(amount), 0)::BIGINT AS max_amount \
             FROM cases WHERE amount IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        let total_comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let total_likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let recent_cases: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cases WHERE created_at >= $1")
                .bind(recent_cutoff)
                .fetch_one(&self.pool)
                .await
                .map_err(db_err)?;

        let regions: Vec<(String, i64)> = sqlx::query_as(
            "SELECT region, COUNT(*) AS cases FROM cases WHERE region IS NOT NULL \
             GROUP BY region ORDER BY cases DESC, region ASC LIMIT $1",
        )
        .bind(TOP_REGION_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(SiteStatistics {
            total_cases,
            cases_by_category,
            amount_stats: AmountStats {
                total_amount: amount_row.total_amount,
                average_amount: amount_row.average_amount,
                min_amount: amount_row.min_amount,
                max_amount: amount_row.max_amount,
            },
            total_comments,
            total_likes,
            recent_cases,
            cases_by_region: regions
                .into_iter()
                .map(|(region, count)| RegionCount { region, count })
                .collect(),
        })
    }
}
