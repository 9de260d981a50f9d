//! Postgres adapters.
//!
//! Row structs mirror the table layout and convert into domain models at
//! the boundary; categories stored as text are parsed back into the
//! closed enum and surface as internal errors when they no longer parse.

mod analytics;
mod cases;
mod comments;
mod likes;
mod stats;

pub use analytics::PgAnalyticsRepo;
pub use cases::PgCaseRepo;
pub use comments::PgCommentRepo;
pub use likes::PgLikeRepo;
pub use stats::PgStatsRepo;

use domains::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Embedded migrations, applied by the binary at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn connect_postgres(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    tracing::debug!(max_connections, "postgres pool ready");
    Ok(pool)
}

/// Maps sqlx failures onto the domain error type. Unique violations keep
/// their own variant so the API can answer 409.
pub(crate) fn db_err(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(db.message().to_string())
        }
        _ => AppError::Internal(err.to_string()),
    }
}

/// Escapes LIKE/ILIKE metacharacters so user input matches literally.
pub(crate) fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%_sure"), "100\\%\\_sure");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
