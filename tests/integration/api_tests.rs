// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::json;
use songswap::infrastructure::database::entities::track;
use sea_orm::EntityTrait;
use uuid::Uuid;

/// 测试提交后查询歌曲
///
/// 查询结果与提交内容一致，且尚无评审
#[tokio::test]
async fn test_submit_then_get_song() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/song/submit-song")
        .json(&json!({ "link": "soundcloud.com/foo", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    let stored = track::Entity::find_by_id(id)
        .one(app.db_pool.as_ref())
        .await
        .unwrap();
    assert!(stored.is_some());

    let response = app.server.get(&format!("/song/id/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let song: serde_json::Value = response.json();
    assert_eq!(song["id"], id.to_string());
    assert_eq!(song["link"], "soundcloud.com/foo");
    assert_eq!(song["email"], "a@x.com");
    assert!(song.get("review").is_none());
}

/// 测试非法链接和邮箱被拒绝
#[tokio::test]
async fn test_submit_song_validation() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/song/submit-song")
        .json(&json!({ "link": "https://example.com/foo", "email": "a@x.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/song/submit-song")
        .json(&json!({ "link": "soundcloud.com/foo", "email": "not-an-email" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/song/start-review")
        .json(&json!({ "email": "not-an-email" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 测试查询不存在的歌曲返回 404
#[tokio::test]
async fn test_get_unknown_song() {
    let app = create_test_app().await;

    let response = app.server.get(&format!("/song/id/{}", Uuid::new_v4())).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

/// 测试健康检查、版本和访问统计端点
#[tokio::test]
async fn test_public_endpoints() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));

    let response = app
        .server
        .post("/visit")
        .add_header("BtsUuid", "visitor-1")
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = app.server.post("/visit/first").await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}
