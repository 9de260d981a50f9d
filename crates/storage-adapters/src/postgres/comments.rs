//! Postgres implementation of the comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domains::{Comment, CommentRepo, Result};

use super::db_err;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    case_id: Uuid,
    nickname: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            case_id: row.case_id,
            nickname: row.nickname,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn insert(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, case_id, nickname, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(comment.id)
        .bind(comment.case_id)
        .bind(&comment.nickname)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_content(
        &self,
        case_id: Uuid,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>> {
        // scoped to the case so a comment id cannot be edited through
        // another case's URL
        let row: Option<CommentRow> = sqlx::query_as(
            "UPDATE comments SET content = $3, updated_at = NOW() \
             WHERE id = $2 AND case_id = $1 \
             RETURNING id, case_id, nickname, content, created_at, updated_at",
        )
        .bind(case_id)
        .bind(comment_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Comment::from))
    }

    async fn delete(&self, case_id: Uuid, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $2 AND case_id = $1")
            .bind(case_id)
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_case(&self, case_id: Uuid) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, case_id, nickname, content, created_at, updated_at \
             FROM comments WHERE case_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }
}
