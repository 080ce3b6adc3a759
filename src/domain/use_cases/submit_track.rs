// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Review;
use crate::domain::models::track::Track;
use crate::domain::repositories::track_repository::TrackRepository;
use crate::domain::use_cases::error::ExchangeError;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 提交与查询歌曲
pub struct SubmitTrackUseCase<T: TrackRepository> {
    tracks: Arc<T>,
}

impl<T: TrackRepository> SubmitTrackUseCase<T> {
    pub fn new(tracks: Arc<T>) -> Self {
        Self { tracks }
    }

    /// 保存一首新歌曲，调用方负责事先校验链接和邮箱
    pub async fn execute(&self, link: String, email: &str) -> Result<Track, ExchangeError> {
        let track = Track::new(link, email);
        let track = self.tracks.create(&track).await?;
        info!(track_id = %track.id, "Track submitted");
        Ok(track)
    }

    /// 查询歌曲及其最近一次评审
    pub async fn find(&self, id: Uuid) -> Result<(Track, Option<Review>), ExchangeError> {
        self.tracks
            .find_with_latest_review(id)
            .await?
            .ok_or(ExchangeError::TrackNotFound)
    }
}
