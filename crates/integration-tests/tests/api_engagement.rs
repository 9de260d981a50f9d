//! HTTP tests for comments and likes.

use axum::body::Body;
use axum::http::Request;
use serde_json::json;
use uuid::Uuid;

use domains::Category;
use integration_tests::{fixtures, http, router_with, MockSet};

#[tokio::test]
async fn comment_creation_returns_201() {
    let case = fixtures::case("Fake job offer asked for my bank login", Category::ReviewJobScam);
    let id = case.id;

    let mut mocks = MockSet::default();
    mocks
        .cases
        .expect_find_by_id()
        .returning(move |_| Ok(Some(case.clone())));
    mocks.comments.expect_insert().returning(|_| Ok(()));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::json_request(
            "POST",
            &format!("/api/cases/{id}/comments"),
            json!({ "nickname": "reader", "content": "Glad you caught it in time." }),
        ),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["nickname"], "reader");
    assert_eq!(body["caseId"], id.to_string());
}

#[tokio::test]
async fn comment_on_unknown_case_is_404() {
    let mut mocks = MockSet::default();
    mocks.cases.expect_find_by_id().returning(|_| Ok(None));

    let (status, _) = http::send_json(
        router_with(mocks),
        http::json_request(
            "POST",
            &format!("/api/cases/{}/comments", Uuid::now_v7()),
            json!({ "nickname": "reader", "content": "hello" }),
        ),
    )
    .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn blank_comment_content_is_400() {
    let (status, body) = http::send_json(
        router_with(MockSet::default()),
        http::json_request(
            "POST",
            &format!("/api/cases/{}/comments", Uuid::now_v7()),
            json!({ "nickname": "reader", "content": "   " }),
        ),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("content"));
}

#[tokio::test]
async fn comment_update_returns_the_new_content() {
    let case_id = Uuid::now_v7();

    let mut mocks = MockSet::default();
    mocks
        .comments
        .expect_update_content()
        .withf(|_, _, content| content == "Edited for clarity.")
        .returning(|case_id, comment_id, content| {
            let mut comment = fixtures::comment(case_id);
            comment.id = comment_id;
            comment.content = content.to_string();
            Ok(Some(comment))
        });

    let (status, body) = http::send_json(
        router_with(mocks),
        http::json_request(
            "PUT",
            &format!("/api/cases/{case_id}/comments/{}", Uuid::now_v7()),
            json!({ "content": "Edited for clarity." }),
        ),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["content"], "Edited for clarity.");
}

#[tokio::test]
async fn deleting_a_foreign_comment_is_404() {
    let mut mocks = MockSet::default();
    mocks.comments.expect_delete().returning(|_, _| Ok(false));

    let (status, _) = http::send_json(
        router_with(mocks),
        http::json_request(
            "DELETE",
            &format!("/api/cases/{}/comments/{}", Uuid::now_v7(), Uuid::now_v7()),
            json!({}),
        ),
    )
    .await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn like_toggle_uses_the_forwarded_ip() {
    let case = fixtures::case("Messenger account takeover asked friends for money", Category::SocialMedia);
    let id = case.id;

    let mut mocks = MockSet::default();
    mocks
        .cases
        .expect_find_by_id()
        .returning(move |_| Ok(Some(case.clone())));
    mocks
        .likes
        .expect_remove()
        .withf(|_, ip| ip == "203.0.113.7")
        .returning(|_, _| Ok(false));
    mocks
        .likes
        .expect_insert()
        .withf(|like| like.ip_address == "203.0.113.7")
        .returning(|_| Ok(true));

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/cases/{id}/like"))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::empty())
        .unwrap();

    let (status, body) = http::send_json(router_with(mocks), request).await;

    assert_eq!(status, 200);
    assert_eq!(body["liked"], true);
    assert_eq!(body["message"], "like added");
}

#[tokio::test]
async fn like_toggle_removes_an_existing_like() {
    let case = fixtures::case("Second toggle removes the first like", Category::Other);
    let id = case.id;

    let mut mocks = MockSet::default();
    mocks
        .cases
        .expect_find_by_id()
        .returning(move |_| Ok(Some(case.clone())));
    mocks.likes.expect_remove().returning(|_, _| Ok(true));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::json_request("POST", &format!("/api/cases/{id}/like"), json!({})),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["liked"], false);
    assert_eq!(body["message"], "like removed");
}

#[tokio::test]
async fn like_status_reports_per_ip_state_and_total() {
    let mut mocks = MockSet::default();
    mocks.likes.expect_exists().returning(|_, _| Ok(true));
    mocks.likes.expect_count_for_case().returning(|_| Ok(3));

    let (status, body) = http::send_json(
        router_with(mocks),
        http::get(&format!("/api/cases/{}/like", Uuid::now_v7())),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["liked"], true);
    assert_eq!(body["totalLikes"], 3);
}
