//! Site metadata: sitemap, robots, category list and the health probe.

use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

use domains::Category;

use crate::dto::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Static pages with the crawl hints they are published under.
const STATIC_PAGES: [(&str, &str, &str); 7] = [
    ("", "daily", "1.0"),
    ("/cases", "daily", "0.9"),
    ("/cases/submit", "weekly", "0.8"),
    ("/statistics", "daily", "0.8"),
    ("/guide", "weekly", "0.7"),
    ("/search", "daily", "0.6"),
    ("/about", "monthly", "0.6"),
];

#[derive(Template)]
#[template(path = "sitemap.xml")]
struct SitemapTemplate {
    urls: Vec<SitemapUrl>,
}

struct SitemapUrl {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let base = state.site.base_url.trim_end_matches('/');
    let today = Utc::now().format("%Y-%m-%d").to_string();

    let mut urls: Vec<SitemapUrl> = STATIC_PAGES
        .iter()
        .map(|&(path, changefreq, priority)| SitemapUrl {
            loc: format!("{base}{path}"),
            lastmod: today.clone(),
            changefreq,
            priority,
        })
        .collect();

    // a failed case query degrades to the static pages instead of a 500;
    // crawlers should always get a sitemap
    match state.cases.sitemap_entries().await {
        Ok(entries) => urls.extend(entries.into_iter().map(|entry| SitemapUrl {
            loc: format!("{base}/cases/{}", entry.slug),
            lastmod: entry.updated_at.format("%Y-%m-%d").to_string(),
            changefreq: "weekly",
            priority: "0.7",
        })),
        Err(err) => tracing::warn!(error = %err, "sitemap case listing failed"),
    }

    match (SitemapTemplate { urls }).render() {
        Ok(xml) => ([(header::CONTENT_TYPE, "application/xml")], xml).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "sitemap rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn robots(State(state): State<AppState>) -> impl IntoResponse {
    let base = state.site.base_url.trim_end_matches('/').to_string();
    let body = format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /statistics\n\
         Disallow: /api/\n\
         \n\
         Sitemap: {base}/sitemap.xml\n\
         Host: {base}\n"
    );
    ([(header::CONTENT_TYPE, "text/plain")], body)
}

pub async fn categories() -> Json<Vec<&'static str>> {
    Json(Category::ALL.iter().map(|c| c.as_str()).collect())
}

/// Connectivity probe: entity counts prove the store answers queries.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let cases = state.cases.count().await?;
    let comments = state.engagement.comment_count().await?;
    let likes = state.engagement.like_count().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        cases,
        comments,
        likes,
    }))
}
