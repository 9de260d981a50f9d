//! HTTP tests for search and visit analytics.

use serde_json::json;

use integration_tests::{fixtures, http, router_with, MockSet};

#[tokio::test]
async fn search_logging_records_query_and_ip() {
    let mut mocks = MockSet::default();
    mocks
        .analytics
        .expect_insert_search()
        .withf(|entry| entry.query == "voice phishing" && !entry.ip_address.is_empty())
        .returning(|_| Ok(()));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::json_request("POST", "/api/search/log", json!({ "query": " voice phishing " })),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn one_character_searches_are_rejected() {
    let (status, _) = http::send_json(
        router_with(MockSet::default()),
        http::json_request("POST", "/api/search/log", json!({ "query": "a" })),
    )
    .await;

    assert_eq!(status, 400);
}

#[tokio::test]
async fn suggestions_come_from_logged_queries() {
    let mut mocks = MockSet::default();
    mocks
        .analytics
        .expect_suggestions()
        .withf(|q, limit| q == "voice" && *limit == 8)
        .returning(|_, _| {
            Ok(vec![
                "voice phishing".to_string(),
                "voice phishing refund".to_string(),
            ])
        });

    let (status, body) = http::send_json(
        router_with(mocks),
        http::get("/api/search/suggestions?q=voice"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body[0], "voice phishing");
}

#[tokio::test]
async fn short_suggestion_queries_return_an_empty_list() {
    // no expectation on the repo: a lookup would panic the test
    let (status, body) = http::send_json(
        router_with(MockSet::default()),
        http::get("/api/search/suggestions?q=v"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_stats_echo_the_period() {
    let mut mocks = MockSet::default();
    mocks
        .analytics
        .expect_search_stats()
        .withf(|since, limit| since.is_some() && *limit == 5)
        .returning(|_, _| Ok(fixtures::search_stats()));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::get("/api/search/stats?period=30d&limit=5"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["period"], "30d");
    assert_eq!(body["totalSearches"], 42);
    assert_eq!(body["uniqueQueries"], 17);
    assert_eq!(body["topSearches"][0]["query"], "voice phishing");
    assert!(body["recentSearches"][0]["createdAt"].is_string());
}

#[tokio::test]
async fn visit_logging_defaults_the_page() {
    let mut mocks = MockSet::default();
    mocks
        .analytics
        .expect_insert_visit()
        .withf(|visit| visit.page == "unknown")
        .returning(|_| Ok(()));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::json_request("POST", "/api/visits", json!({})),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn visit_stats_cover_totals_and_pages() {
    let mut mocks = MockSet::default();
    mocks
        .analytics
        .expect_visit_stats()
        .withf(|since| since.is_none())
        .returning(|_| Ok(fixtures::visit_stats()));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::get("/api/visits?period=all"),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["totalVisits"], 120);
    assert_eq!(body["uniqueVisitors"], 48);
    assert_eq!(body["pageStats"][0]["page"], "/cases");
    assert_eq!(body["pageStats"][0]["visits"], 77);
}
