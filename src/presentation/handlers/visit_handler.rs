// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics_service::{track_detached, AnalyticsSink};
use crate::presentation::extractors::analytics_context::AnalyticsContext;
use axum::{http::StatusCode, Extension};
use serde_json::json;
use std::sync::Arc;

/// 记录落地页访问
pub async fn visit(
    Extension(analytics): Extension<Arc<dyn AnalyticsSink>>,
    context: AnalyticsContext,
) -> StatusCode {
    track_detached(analytics, "Visited Landing Page", context.properties(json!({})));
    StatusCode::NO_CONTENT
}

/// 记录首次访问
pub async fn first_visit(
    Extension(analytics): Extension<Arc<dyn AnalyticsSink>>,
    context: AnalyticsContext,
) -> StatusCode {
    track_detached(analytics, "First Visit", context.properties(json!({})));
    StatusCode::NO_CONTENT
}
