// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use songswap::domain::repositories::review_repository::ReviewRepository;
use uuid::Uuid;

/// 测试重复提交评审只通知一次
#[tokio::test]
async fn test_double_completion_notifies_once() {
    let app = create_test_app().await;
    let track = app
        .insert_track("soundcloud.com/artist/song", "Owner@Example.com", Duration::minutes(5))
        .await;

    let response = app
        .server
        .post("/song/start-review")
        .json(&json!({ "email": "reviewer@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    let review_id = body["review"]["id"].as_str().unwrap().to_string();

    let first = app
        .server
        .post("/song/submit-review")
        .json(&json!({ "reviewId": review_id, "text": "Great groove", "liked": true }))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let first: serde_json::Value = first.json();
    assert_eq!(first["text"], "Great groove");
    assert_eq!(first["liked"], true);
    assert!(!first["completedAt"].is_null());

    let second = app
        .server
        .post("/song/submit-review")
        .json(&json!({ "reviewId": review_id, "text": "Changed my mind", "liked": false }))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let second: serde_json::Value = second.json();
    assert_eq!(second["text"], "Changed my mind");
    assert_eq!(second["completedAt"], first["completedAt"]);

    assert_eq!(app.notifier.count(), 1);
    let sent = app.notifier.sent.lock().unwrap().clone();
    assert_eq!(sent[0], ("owner@example.com".to_string(), track.id));

    let stored = app
        .reviews
        .find_by_id(Uuid::parse_str(&review_id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.notified_at.is_some());

    let song = app.server.get(&format!("/song/id/{}", track.id)).await;
    let song: serde_json::Value = song.json();
    assert_eq!(song["review"]["text"], "Changed my mind");
}

/// 测试提交未知评审ID返回 404
#[tokio::test]
async fn test_unknown_review_id_is_not_found() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/song/submit-review")
        .json(&json!({ "reviewId": Uuid::new_v4(), "text": "Nice" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(app.notifier.count(), 0);
}

/// 测试空评审正文被拒绝
#[tokio::test]
async fn test_empty_review_text_is_rejected() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/song/submit-review")
        .json(&json!({ "reviewId": Uuid::new_v4(), "text": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
