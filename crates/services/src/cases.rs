//! Case use-cases: submission, lookup, listing, update, deletion and the
//! related-cases picker.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::slug;
use domains::{
    AppError, Case, CaseDraft, CaseFilter, CasePage, CaseRepo, CaseSummary, CaseUpdate, Page,
    Result, SitemapEntry,
};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MIN_CHARS: usize = 20;
pub const CONTENT_MAX_CHARS: usize = 5000;
pub const AMOUNT_MAX_WON: i64 = 10_000_000_000;

/// Upper bound on numbered slug probes before giving up with a conflict.
const MAX_SLUG_PROBES: u32 = 1000;

pub const RELATED_DEFAULT_LIMIT: i64 = 2;
const RELATED_MAX_LIMIT: i64 = 20;

pub struct CaseService {
    repo: Arc<dyn CaseRepo>,
}

impl CaseService {
    pub fn new(repo: Arc<dyn CaseRepo>) -> Self {
        Self { repo }
    }

    /// Validates a submission, derives a unique slug and persists the case.
    pub async fn create(&self, draft: CaseDraft) -> Result<Case> {
        let title = validate_title(&draft.title)?;
        let content = validate_content(&draft.content)?;
        if let Some(amount) = draft.amount {
            validate_amount(amount)?;
        }

        let base = slug::base_slug(&title, draft.category);
        let slug = self.unique_slug(&base).await?;

        let now = Utc::now();
        let case = Case {
            id: Uuid::now_v7(),
            title,
            slug,
            category: draft.category,
            amount: draft.amount,
            content,
            region: non_empty(draft.region),
            tip: non_empty(draft.tip),
            created_at: now,
            updated_at: now,
        };
        self.repo.insert(&case).await?;
        tracing::info!(case_id = %case.id, slug = %case.slug, "case created");
        Ok(case)
    }

    /// Probes numbered variants until a free slug is found.
    async fn unique_slug(&self, base: &str) -> Result<String> {
        if !self.repo.slug_exists(base).await? {
            return Ok(base.to_string());
        }
        for n in 1..=MAX_SLUG_PROBES {
            let candidate = slug::numbered(base, n);
            if !self.repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::Conflict(format!(
            "no free slug variant for {base}"
        )))
    }

    pub async fn get(&self, id: Uuid) -> Result<CaseSummary> {
        self.repo
            .find_summary(id)
            .await?
            .ok_or_else(|| AppError::NotFound("case", id.to_string()))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<CaseSummary> {
        self.repo
            .find_summary_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("case", slug.to_string()))
    }

    pub async fn list(&self, filter: CaseFilter, page: Page) -> Result<CasePage> {
        self.repo.list(&filter, page).await
    }

    /// Applies a partial update. The slug is never regenerated; a case URL
    /// stays stable for its lifetime.
    pub async fn update(&self, id: Uuid, update: CaseUpdate) -> Result<Case> {
        let mut case = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("case", id.to_string()))?;

        if let Some(title) = update.title {
            case.title = validate_title(&title)?;
        }
        if let Some(category) = update.category {
            case.category = category;
        }
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
            case.amount = Some(amount);
        }
        if let Some(content) = update.content {
            case.content = validate_content(&content)?;
        }
        if let Some(region) = update.region {
            case.region = non_empty(Some(region));
        }
        if let Some(tip) = update.tip {
            case.tip = non_empty(Some(tip));
        }
        case.updated_at = Utc::now();

        self.repo.update(&case).await?;
        Ok(case)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("case", id.to_string()));
        }
        tracing::info!(case_id = %id, "case deleted");
        Ok(())
    }

    /// Other cases sharing category or region, newest first, backfilled
    /// with recent cases when too few match.
    pub async fn related(&self, id: Uuid, limit: Option<i64>) -> Result<Vec<CaseSummary>> {
        let limit = limit
            .unwrap_or(RELATED_DEFAULT_LIMIT)
            .clamp(1, RELATED_MAX_LIMIT);

        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("case", id.to_string()))?;

        let mut out = self
            .repo
            .related(
                &[id],
                Some(current.category),
                current.region.as_deref(),
                limit,
            )
            .await?;

        if (out.len() as i64) < limit {
            let mut exclude: Vec<Uuid> = vec![id];
            exclude.extend(out.iter().map(|s| s.case.id));
            let backfill = self
                .repo
                .related(&exclude, None, None, limit - out.len() as i64)
                .await?;
            out.extend(backfill);
        }
        Ok(out)
    }

    pub async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>> {
        self.repo.sitemap_entries().await
    }

    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(AppError::Validation(format!(
            "title must be at least {TITLE_MIN_CHARS} characters"
        )));
    }
    if len > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "title must not exceed {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_content(content: &str) -> Result<String> {
    let content = content.trim();
    let len = content.chars().count();
    if len < CONTENT_MIN_CHARS {
        return Err(AppError::Validation(format!(
            "content must be at least {CONTENT_MIN_CHARS} characters"
        )));
    }
    if len > CONTENT_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "content must not exceed {CONTENT_MAX_CHARS} characters"
        )));
    }
    Ok(content.to_string())
}

fn validate_amount(amount: i64) -> Result<()> {
    if !(0..=AMOUNT_MAX_WON).contains(&amount) {
        return Err(AppError::Validation(format!(
            "damage amount must be between 0 and {AMOUNT_MAX_WON} won"
        )));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
