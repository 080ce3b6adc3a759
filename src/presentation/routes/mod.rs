// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics_service::AnalyticsSink;
use crate::domain::services::notification_service::Notifier;
use crate::infrastructure::repositories::review_repo_impl::ReviewRepositoryImpl;
use crate::infrastructure::repositories::track_repo_impl::TrackRepositoryImpl;
use crate::presentation::handlers::{song_handler, visit_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 路由处理器依赖的服务集合
#[derive(Clone)]
pub struct AppServices {
    pub tracks: Arc<TrackRepositoryImpl>,
    pub reviews: Arc<ReviewRepositoryImpl>,
    pub notifier: Arc<dyn Notifier>,
    pub analytics: Arc<dyn AnalyticsSink>,
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let song_routes = Router::new()
        .route(
            "/song/submit-song",
            post(song_handler::submit_song::<TrackRepositoryImpl>),
        )
        .route(
            "/song/start-review",
            post(song_handler::start_review::<ReviewRepositoryImpl>),
        )
        .route(
            "/song/submit-review",
            post(song_handler::submit_review::<TrackRepositoryImpl, ReviewRepositoryImpl>),
        )
        .route(
            "/song/id/{id}",
            get(song_handler::get_song::<TrackRepositoryImpl>),
        )
        .route("/visit", post(visit_handler::visit))
        .route("/visit/first", post(visit_handler::first_visit));

    public_routes.merge(song_routes)
}

/// 组装完整应用：路由、依赖注入和通用中间件
pub fn app(services: AppServices) -> Router {
    routes().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(Extension(services.tracks))
            .layer(Extension(services.reviews))
            .layer(Extension(services.notifier))
            .layer(Extension(services.analytics)),
    )
}

/// 健康检查端点
async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
