// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use songswap::domain::repositories::review_repository::ReviewRepository;

/// 测试并发领取的互斥性
///
/// 只有一首可评审歌曲时，8 个并发请求中恰好一个成功
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_are_exclusive() {
    let app = create_test_app().await;
    let track = app
        .insert_track("soundcloud.com/artist/only", "owner@example.com", Duration::minutes(5))
        .await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let reviews = app.reviews.clone();
        handles.push(tokio::spawn(async move {
            let requester = format!("reviewer{}@example.com", i);
            reviews.claim_next(Some(&requester)).await
        }));
    }

    let mut claimed = Vec::new();
    for handle in handles {
        if let Some(assignment) = handle.await.unwrap().unwrap() {
            claimed.push(assignment);
        }
    }

    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].track.id, track.id);

    // The track stays blocked for everyone else
    assert!(app.reviews.claim_next(None).await.unwrap().is_none());
}

/// 测试请求者不会领取到自己提交的歌曲
#[tokio::test]
async fn test_requester_never_receives_own_track() {
    let app = create_test_app().await;
    app.insert_track("soundcloud.com/artist/mine", "me@example.com", Duration::minutes(5))
        .await;

    let response = app
        .server
        .post("/song/start-review")
        .json(&json!({ "email": "Me@Example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No songs available to review at the moment.");

    let response = app
        .server
        .post("/song/start-review")
        .json(&json!({ "email": "someone@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

/// 测试按提交时间先进先出分配
#[tokio::test]
async fn test_oldest_track_is_assigned_first() {
    let app = create_test_app().await;
    let older = app
        .insert_track("soundcloud.com/artist/older", "a@example.com", Duration::minutes(30))
        .await;
    let newer = app
        .insert_track("soundcloud.com/artist/newer", "b@example.com", Duration::minutes(10))
        .await;

    let response = app.server.post("/song/start-review").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], older.id.to_string());
    assert_eq!(body["link"], "soundcloud.com/artist/older");
    assert!(body["review"]["text"].is_null());
    assert!(body["review"]["completedAt"].is_null());

    let response = app.server.post("/song/start-review").json(&json!({})).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], newer.id.to_string());

    let response = app.server.post("/song/start-review").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 测试未完成评审的失效窗口
///
/// 61 分钟前的未完成评审不再阻塞分配，59 分钟前的仍然阻塞
#[tokio::test]
async fn test_abandoned_review_expires_after_window() {
    let app = create_test_app().await;
    let stale = app
        .insert_track("soundcloud.com/artist/stale", "a@example.com", Duration::minutes(120))
        .await;
    app.insert_review(stale.id, Duration::minutes(61), false).await;

    let fresh = app
        .insert_track("soundcloud.com/artist/fresh", "b@example.com", Duration::minutes(120))
        .await;
    app.insert_review(fresh.id, Duration::minutes(59), false).await;

    let assignment = app.reviews.claim_next(None).await.unwrap().unwrap();
    assert_eq!(assignment.track.id, stale.id);

    assert!(app.reviews.claim_next(None).await.unwrap().is_none());
}

/// 测试只有最近一次评审决定能否分配
///
/// 放弃的旧评审被补交后，新评审一旦失效，歌曲重新进入队列
#[tokio::test]
async fn test_late_completion_of_older_review_does_not_block() {
    let app = create_test_app().await;
    let track = app
        .insert_track("soundcloud.com/artist/late", "a@example.com", Duration::hours(4))
        .await;
    app.insert_review(track.id, Duration::hours(3), true).await;
    app.insert_review(track.id, Duration::hours(2), false).await;

    let assignment = app.reviews.claim_next(None).await.unwrap().unwrap();
    assert_eq!(assignment.track.id, track.id);

    // The new claim is fresh and blocks again
    assert!(app.reviews.claim_next(None).await.unwrap().is_none());
}

/// 测试最近一次评审已完成时永久阻塞分配
#[tokio::test]
async fn test_completed_review_blocks_forever() {
    let app = create_test_app().await;
    let track = app
        .insert_track("soundcloud.com/artist/done", "a@example.com", Duration::days(3))
        .await;
    app.insert_review(track.id, Duration::days(2), true).await;

    assert!(app.reviews.claim_next(None).await.unwrap().is_none());
}
