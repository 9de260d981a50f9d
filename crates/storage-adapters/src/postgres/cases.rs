//! Postgres implementation of the case repository.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use domains::{
    AppError, Case, CaseFilter, CasePage, CaseRepo, CaseSort, CaseSummary, Category, Page, Result,
    SitemapEntry, SortOrder,
};

use super::{db_err, escape_like};

/// Case columns plus engagement counts, aliased for [`SummaryRow`].
const SUMMARY_SELECT: &str = "SELECT c.id, c.title, c.slug, c.category, c.amount, c.content, \
     c.region, c.tip, c.created_at, c.updated_at, \
     (SELECT COUNT(*) FROM comments m WHERE m.case_id = c.id) AS comment_count, \
     (SELECT COUNT(*) FROM likes l WHERE l.case_id = c.id) AS like_count \
     FROM cases c";

const CASE_SELECT: &str = "SELECT id, title, slug, category, amount, content, region, tip, \
     created_at, updated_at FROM cases";

#[derive(sqlx::FromRow)]
struct CaseRow {
    id: Uuid,
    title: String,
    slug: String,
    category: String,
    amount: Option<i64>,
    content: String,
    region: Option<String>,
    tip: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CaseRow> for Case {
    type Error = AppError;

    fn try_from(row: CaseRow) -> Result<Self> {
        let category = Category::from_str(&row.category)
            .map_err(|_| AppError::Internal(format!("unknown category in store: {}", row.category)))?;
        Ok(Case {
            id: row.id,
            title: row.title,
            slug: row.slug,
            category,
            amount: row.amount,
            content: row.content,
            region: row.region,
            tip: row.tip,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    #[sqlx(flatten)]
    case: CaseRow,
    comment_count: i64,
    like_count: i64,
}

impl TryFrom<SummaryRow> for CaseSummary {
    type Error = AppError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        Ok(CaseSummary {
            case: row.case.try_into()?,
            comment_count: row.comment_count,
            like_count: row.like_count,
        })
    }
}

pub struct PgCaseRepo {
    pool: PgPool,
}

impl PgCaseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the WHERE clause shared by the listing and its count query.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &CaseFilter) {
    let mut has_where = false;

    if let Some(category) = filter.category {
        qb.push(" WHERE c.category = ").push_bind(category.as_str());
        has_where = true;
    }

    if let Some(search) = filter.search.as_deref().map(str::trim) {
        if !search.is_empty() {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(if has_where { " AND " } else { " WHERE " });
            qb.push("(c.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.category ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.content ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR c.region ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

/// Whitelisted ORDER BY fragments; user input never reaches the SQL text.
fn order_clause(sort: CaseSort, order: SortOrder) -> &'static str {
    match (sort, order) {
        (CaseSort::CreatedAt, SortOrder::Asc) => "c.created_at ASC, c.id ASC",
        (CaseSort::CreatedAt, SortOrder::Desc) => "c.created_at DESC, c.id DESC",
        (CaseSort::UpdatedAt, SortOrder::Asc) => "c.updated_at ASC, c.id ASC",
        (CaseSort::UpdatedAt, SortOrder::Desc) => "c.updated_at DESC, c.id DESC",
        (CaseSort::Amount, SortOrder::Asc) => "c.amount ASC NULLS LAST, c.id ASC",
        (CaseSort::Amount, SortOrder::Desc) => "c.amount DESC NULLS LAST, c.id DESC",
        (CaseSort::Title, SortOrder::Asc) => "c.title ASC, c.id ASC",
        (CaseSort::Title, SortOrder::Desc) => "c.title DESC, c.id DESC",
    }
}

#[async_trait]
impl CaseRepo for PgCaseRepo {
    async fn insert(&self, case: &Case) -> Result<()> {
        sqlx::query(
            "INSERT INTO cases (id, title, slug, category, amount, content, region, tip, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(case.id)
        .bind(&case.title)
        .bind(&case.slug)
        .bind(case.category.as_str())
        .bind(case.amount)
        .bind(&case.content)
        .bind(&case.region)
        .bind(&case.tip)
        .bind(case.created_at)
        .bind(case.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update(&self, case: &Case) -> Result<()> {
        sqlx::query(
            "UPDATE cases SET title = $2, category = $3, amount = $4, content = $5, \
             region = $6, tip = $7, updated_at = $8 WHERE id = $1",
        )
        .bind(case.id)
        .bind(&case.title)
        .bind(case.category.as_str())
        .bind(case.amount)
        .bind(&case.content)
        .bind(&case.region)
        .bind(&case.tip)
        .bind(case.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cases WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Case>> {
        let row: Option<CaseRow> =
            sqlx::query_as(&format!("{CASE_SELECT} WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.map(Case::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Case>> {
        let row: Option<CaseRow> =
            sqlx::query_as(&format!("{CASE_SELECT} WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.map(Case::try_from).transpose()
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cases WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn find_summary(&self, id: Uuid) -> Result<Option<CaseSummary>> {
        let row: Option<SummaryRow> =
            sqlx::query_as(&format!("{SUMMARY_SELECT} WHERE c.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.map(CaseSummary::try_from).transpose()
    }

    async fn find_summary_by_slug(&self, slug: &str) -> Result<Option<CaseSummary>> {
        let row: Option<SummaryRow> =
            sqlx::query_as(&format!("{SUMMARY_SELECT} WHERE c.slug = $1"))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        row.map(CaseSummary::try_from).transpose()
    }

    async fn list(&self, filter: &CaseFilter, page: Page) -> Result<CasePage> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cases c");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let mut qb = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(order_clause(filter.sort, filter.order))
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<SummaryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let items = rows
            .into_iter()
            .map(CaseSummary::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(CasePage { items, total })
    }

    async fn related<'a>(
        &self,
        exclude: &[Uuid],
        category: Option<Category>,
        region: Option<&'a str>,
        limit: i64,
    ) -> Result<Vec<CaseSummary>> {
        let mut qb = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        qb.push(" WHERE c.id <> ALL(")
            .push_bind(exclude.to_vec())
            .push(")");

        match (category, region) {
            (Some(cat), Some(reg)) => {
                qb.push(" AND (c.category = ")
                    .push_bind(cat.as_str())
                    .push(" OR c.region = ")
                    .push_bind(reg.to_string())
                    .push(")");
            }
            (Some(cat), None) => {
                qb.push(" AND c.category = ").push_bind(cat.as_str());
            }
            (None, Some(reg)) => {
                qb.push(" AND c.region = ").push_bind(reg.to_string());
            }
            (None, None) => {}
        }

        qb.push(" ORDER BY c.created_at DESC, c.id DESC LIMIT ")
            .push_bind(limit);

        let rows: Vec<SummaryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(CaseSummary::try_from).collect()
    }

    async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>> {
        let rows: Vec<(String, DateTime<Utc>)> =
            sqlx::query_as("SELECT slug, updated_at FROM cases ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|(slug, updated_at)| SitemapEntry { slug, updated_at })
            .collect())
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cases")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_covers_every_sort_combination() {
        assert_eq!(
            order_clause(CaseSort::CreatedAt, SortOrder::Desc),
            "c.created_at DESC, c.id DESC"
        );
        // undisclosed amounts sort after every disclosed one
        assert!(order_clause(CaseSort::Amount, SortOrder::Desc).contains("NULLS LAST"));
        assert!(order_clause(CaseSort::Title, SortOrder::Asc).starts_with("c.title ASC"));
    }

    #[test]
    fn category_parse_failures_surface_as_internal() {
        let row = CaseRow {
            id: Uuid::now_v7(),
            title: "t".to_string(),
            slug: "s".to_string(),
            category: "carrier-pigeon".to_string(),
            amount: None,
            content: "c".to_string(),
            region: None,
            tip: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            Case::try_from(row),
            Err(AppError::Internal(_))
        ));
    }
}
