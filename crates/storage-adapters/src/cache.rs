//! Redis-backed cache for the statistics aggregate.

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::Pool;

use domains::{AppError, Result, SiteStatistics, StatsCache};

const STATS_KEY: &str = "phishwatch:statistics";

pub struct RedisStatsCache {
    pool: Pool,
}

impl RedisStatsCache {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn cache_err(err: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("statistics cache: {err}"))
}

#[async_trait]
impl StatsCache for RedisStatsCache {
    async fn get(&self) -> Result<Option<SiteStatistics>> {
        let mut conn = self.pool.get().await.map_err(cache_err)?;
        let raw: Option<String> = conn.get(STATS_KEY).await.map_err(cache_err)?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json).map_err(cache_err)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, stats: &SiteStatistics, ttl_secs: u64) -> Result<()> {
        let payload = serde_json::to_string(stats).map_err(cache_err)?;
        let mut conn = self.pool.get().await.map_err(cache_err)?;
        conn.set_ex::<_, _, ()>(STATS_KEY, payload, ttl_secs)
            .await
            .map_err(cache_err)?;
        Ok(())
    }
}
