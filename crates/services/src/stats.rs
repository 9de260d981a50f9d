//! The site-statistics aggregate with its cache-aside read path.

use std::sync::Arc;

use chrono::Utc;

use domains::{Result, SiteStatistics, StatsCache, StatsRepo};

/// How long a cached aggregate stays fresh.
pub const STATISTICS_TTL_SECS: u64 = 3600;

/// Window for the "recent cases" figure.
const RECENT_WINDOW_DAYS: i64 = 7;

pub struct StatsService {
    repo: Arc<dyn StatsRepo>,
    cache: Option<Arc<dyn StatsCache>>,
}

impl StatsService {
    pub fn new(repo: Arc<dyn StatsRepo>, cache: Option<Arc<dyn StatsCache>>) -> Self {
        Self { repo, cache }
    }

    /// Serves the aggregate from cache when possible. Cache failures are
    /// logged and degrade to direct queries; they never fail the request.
    pub async fn site_statistics(&self) -> Result<SiteStatistics> {
        if let Some(cache) = &self.cache {
            match cache.get().await {
                Ok(Some(stats)) => return Ok(stats),
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "statistics cache read failed"),
            }
        }

        let cutoff = Utc::now() - chrono::Duration::days(RECENT_WINDOW_DAYS);
        let stats = self.repo.collect(cutoff).await?;

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.put(&stats, STATISTICS_TTL_SECS).await {
                tracing::warn!(error = %err, "statistics cache write failed");
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{AmountStats, AppError, MockStatsCache, MockStatsRepo};

    fn sample_stats() -> SiteStatistics {
        SiteStatistics {
            total_cases: 12,
            cases_by_category: vec![],
            amount_stats: AmountStats::default(),
            total_comments: 3,
            total_likes: 7,
            recent_cases: 2,
            cases_by_region: vec![],
        }
    }

    #[tokio::test]
    async fn cache_hit_skips_the_repository() {
        let mut cache = MockStatsCache::new();
        cache.expect_get().returning(|| Ok(Some(sample_stats())));

        // repository has no expectations: a call would panic
        let service = StatsService::new(Arc::new(MockStatsRepo::new()), Some(Arc::new(cache)));
        let stats = service.site_statistics().await.unwrap();
        assert_eq!(stats.total_cases, 12);
    }

    #[tokio::test]
    async fn cache_miss_collects_and_writes_back() {
        let mut cache = MockStatsCache::new();
        cache.expect_get().returning(|| Ok(None));
        cache
            .expect_put()
            .withf(|stats, ttl| stats.total_cases == 12 && *ttl == STATISTICS_TTL_SECS)
            .returning(|_, _| Ok(()));

        let mut repo = MockStatsRepo::new();
        repo.expect_collect().returning(|_| Ok(sample_stats()));

        let service = StatsService::new(Arc::new(repo), Some(Arc::new(cache)));
        let stats = service.site_statistics().await.unwrap();
        assert_eq!(stats.total_likes, 7);
    }

    #[tokio::test]
    async fn cache_errors_fall_back_to_the_repository() {
        let mut cache = MockStatsCache::new();
        cache
            .expect_get()
            .returning(|| Err(AppError::Internal("redis down".to_string())));
        cache
            .expect_put()
            .returning(|_, _| Err(AppError::Internal("redis down".to_string())));

        let mut repo = MockStatsRepo::new();
        repo.expect_collect().returning(|_| Ok(sample_stats()));

        let service = StatsService::new(Arc::new(repo), Some(Arc::new(cache)));
        let stats = service.site_statistics().await.unwrap();
        assert_eq!(stats.total_cases, 12);
    }

    #[tokio::test]
    async fn works_without_a_cache() {
        let mut repo = MockStatsRepo::new();
        repo.expect_collect().returning(|_| Ok(sample_stats()));

        let service = StatsService::new(Arc::new(repo), None);
        let stats = service.site_statistics().await.unwrap();
        assert_eq!(stats.recent_cases, 2);
    }
}
