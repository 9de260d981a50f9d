//! Postgres implementation of the like repository.
//!
//! The unique (case_id, ip_address) index is the source of truth for the
//! one-like-per-IP invariant; inserts ride on it with ON CONFLICT.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Like, LikeRepo, Result};

use super::db_err;

pub struct PgLikeRepo {
    pool: PgPool,
}

impl PgLikeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepo for PgLikeRepo {
    async fn insert(&self, like: &Like) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO likes (id, case_id, ip_address, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (case_id, ip_address) DO NOTHING",
        )
        .bind(like.id)
        .bind(like.case_id)
        .bind(&like.ip_address)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, case_id: Uuid, ip_address: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE case_id = $1 AND ip_address = $2")
            .bind(case_id)
            .bind(ip_address)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, case_id: Uuid, ip_address: &str) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE case_id = $1 AND ip_address = $2)",
        )
        .bind(case_id)
        .bind(ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn count_for_case(&self, case_id: Uuid) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE case_id = $1")
            .bind(case_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }
}
