//! HTTP tests for statistics, categories, health and the SEO endpoints.

use chrono::Utc;

use domains::SitemapEntry;
use integration_tests::{fixtures, http, router_with, MockSet, BASE_URL};

#[tokio::test]
async fn statistics_serialize_camel_case() {
    let mut mocks = MockSet::default();
    mocks
        .stats
        .expect_collect()
        .returning(|_| Ok(fixtures::site_statistics()));

    let (status, body) = http::send_json(router_with(mocks), http::get("/api/statistics")).await;

    assert_eq!(status, 200);
    assert_eq!(body["totalCases"], 9);
    assert_eq!(body["casesByCategory"][0]["category"], "smishing");
    assert_eq!(body["amountStats"]["maxAmount"], 1_200_000);
    assert_eq!(body["recentCases"], 3);
    assert_eq!(body["casesByRegion"][0]["region"], "Seoul");
}

#[tokio::test]
async fn categories_list_the_closed_set() {
    let (status, body) =
        http::send_json(router_with(MockSet::default()), http::get("/api/categories")).await;

    assert_eq!(status, 200);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert!(list.iter().any(|c| c == "voice-phishing"));
    assert!(list.iter().any(|c| c == "review-job-scam"));
}

#[tokio::test]
async fn health_reports_entity_counts() {
    let mut mocks = MockSet::default();
    mocks.cases.expect_count().returning(|| Ok(7));
    mocks.comments.expect_count().returning(|| Ok(13));
    mocks.likes.expect_count().returning(|| Ok(4));

    let (status, body) = http::send_json(router_with(mocks), http::get("/api/health")).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cases"], 7);
    assert_eq!(body["comments"], 13);
    assert_eq!(body["likes"], 4);
}

#[tokio::test]
async fn sitemap_lists_static_pages_and_case_slugs() {
    let mut mocks = MockSet::default();
    mocks.cases.expect_sitemap_entries().returning(|| {
        Ok(vec![SitemapEntry {
            slug: "smishing-parcel-text-case".to_string(),
            updated_at: Utc::now(),
        }])
    });

    let (status, bytes) = http::send(router_with(mocks), http::get("/sitemap.xml")).await;
    let xml = String::from_utf8(bytes).unwrap();

    assert_eq!(status, 200);
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<urlset"));
    assert!(xml.contains(&format!("<loc>{BASE_URL}/cases</loc>")));
    assert!(xml.contains(&format!(
        "<loc>{BASE_URL}/cases/smishing-parcel-text-case</loc>"
    )));
    assert!(xml.contains("<changefreq>daily</changefreq>"));
    assert!(xml.contains("<priority>0.7</priority>"));
}

#[tokio::test]
async fn sitemap_degrades_to_static_pages_on_storage_failure() {
    let mut mocks = MockSet::default();
    mocks
        .cases
        .expect_sitemap_entries()
        .returning(|| Err(domains::AppError::Internal("db down".to_string())));

    let (status, bytes) = http::send(router_with(mocks), http::get("/sitemap.xml")).await;
    let xml = String::from_utf8(bytes).unwrap();

    assert_eq!(status, 200);
    assert!(xml.contains(&format!("<loc>{BASE_URL}/statistics</loc>")));
    assert!(!xml.contains("/cases/smishing"));
}

#[tokio::test]
async fn robots_disallow_api_and_point_at_the_sitemap() {
    let (status, bytes) = http::send(router_with(MockSet::default()), http::get("/robots.txt")).await;
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(status, 200);
    assert!(text.contains("User-agent: *"));
    assert!(text.contains("Disallow: /api/"));
    assert!(text.contains("Disallow: /statistics"));
    assert!(text.contains(&format!("Sitemap: {BASE_URL}/sitemap.xml")));
}

#[tokio::test]
async fn metrics_count_handled_requests() {
    let mut mocks = MockSet::default();
    mocks.cases.expect_count().returning(|| Ok(0));
    mocks.comments.expect_count().returning(|| Ok(0));
    mocks.likes.expect_count().returning(|| Ok(0));

    // the router is cloned so both requests share one metrics registry
    let app = router_with(mocks);
    let _ = http::send(app.clone(), http::get("/api/health")).await;
    let (status, bytes) = http::send(app, http::get("/metrics")).await;
    let text = String::from_utf8(bytes).unwrap();

    assert_eq!(status, 200);
    assert!(text.contains("http_requests_total"));
    assert!(text.contains("method=\"GET\""));
}
