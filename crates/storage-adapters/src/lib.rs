//! Storage adapters: Postgres implementations of the domain ports plus
//! the Redis statistics cache.

pub mod cache;
pub mod postgres;

pub use cache::RedisStatsCache;
pub use postgres::{
    connect_postgres, PgAnalyticsRepo, PgCaseRepo, PgCommentRepo, PgLikeRepo, PgStatsRepo,
    MIGRATOR,
};
