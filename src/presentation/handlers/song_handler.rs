// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::song_request::{
    StartReviewRequestDto, SubmitReviewRequestDto, SubmitSongRequestDto,
};
use crate::application::dto::song_response::{
    ReviewResponseDto, SongResponseDto, StartReviewResponseDto, SubmitSongResponseDto,
};
use crate::domain::repositories::review_repository::ReviewRepository;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::services::analytics_service::{track_detached, AnalyticsSink};
use crate::domain::services::notification_service::Notifier;
use crate::domain::use_cases::complete_review::CompleteReviewUseCase;
use crate::domain::use_cases::error::ExchangeError;
use crate::domain::use_cases::start_review::StartReviewUseCase;
use crate::domain::use_cases::submit_track::SubmitTrackUseCase;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::analytics_context::AnalyticsContext;
use axum::{extract::Path, http::StatusCode, Extension, Json};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 提交歌曲
pub async fn submit_song<T: TrackRepository + 'static>(
    Extension(tracks): Extension<Arc<T>>,
    Extension(analytics): Extension<Arc<dyn AnalyticsSink>>,
    context: AnalyticsContext,
    Json(payload): Json<SubmitSongRequestDto>,
) -> Result<(StatusCode, Json<SubmitSongResponseDto>), AppError> {
    payload.validate()?;

    let use_case = SubmitTrackUseCase::new(tracks);
    let track = use_case.execute(payload.link, &payload.email).await?;

    track_detached(
        analytics,
        "Song Submitted",
        context.properties(json!({ "track_id": track.id, "link": track.link })),
    );

    Ok((StatusCode::CREATED, Json(SubmitSongResponseDto { id: track.id })))
}

/// 领取一首待评审歌曲
pub async fn start_review<R: ReviewRepository + 'static>(
    Extension(reviews): Extension<Arc<R>>,
    Extension(analytics): Extension<Arc<dyn AnalyticsSink>>,
    context: AnalyticsContext,
    Json(payload): Json<StartReviewRequestDto>,
) -> Result<Json<StartReviewResponseDto>, AppError> {
    payload.validate()?;

    let use_case = StartReviewUseCase::new(reviews);
    match use_case.execute(payload.email.as_deref()).await {
        Ok(assignment) => {
            track_detached(
                analytics,
                "Review Started",
                context.properties(json!({
                    "track_id": assignment.track.id,
                    "review_id": assignment.review.id,
                })),
            );
            Ok(Json(assignment.into()))
        }
        Err(ExchangeError::NoTrackAvailable) => {
            track_detached(analytics, "No Review Available", context.properties(json!({})));
            Err(ExchangeError::NoTrackAvailable.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// 提交评审
pub async fn submit_review<T, R>(
    Extension(tracks): Extension<Arc<T>>,
    Extension(reviews): Extension<Arc<R>>,
    Extension(notifier): Extension<Arc<dyn Notifier>>,
    Extension(analytics): Extension<Arc<dyn AnalyticsSink>>,
    context: AnalyticsContext,
    Json(payload): Json<SubmitReviewRequestDto>,
) -> Result<Json<ReviewResponseDto>, AppError>
where
    T: TrackRepository + 'static,
    R: ReviewRepository + 'static,
{
    payload.validate()?;

    let use_case = CompleteReviewUseCase::new(tracks, reviews, notifier);
    let review = use_case
        .execute(payload.review_id, payload.text, payload.liked)
        .await?;

    track_detached(
        analytics,
        "Review Submitted",
        context.properties(json!({
            "track_id": review.track_id,
            "review_id": review.id,
            "liked": review.liked,
        })),
    );

    Ok(Json(review.into()))
}

/// 查询歌曲及其最近一次评审
pub async fn get_song<T: TrackRepository + 'static>(
    Extension(tracks): Extension<Arc<T>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SongResponseDto>, AppError> {
    let use_case = SubmitTrackUseCase::new(tracks);
    let found = use_case.find(id).await?;
    Ok(Json(found.into()))
}
