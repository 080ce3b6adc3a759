// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::{Assignment, Review};
use crate::domain::models::track::Track;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 提交歌曲响应
#[derive(Debug, Deserialize, Serialize)]
pub struct SubmitSongResponseDto {
    /// 新歌曲ID
    pub id: Uuid,
}

/// 评审响应
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponseDto {
    pub id: Uuid,
    pub completed_at: Option<DateTime<FixedOffset>>,
    pub text: Option<String>,
    pub liked: Option<bool>,
    /// 评审者邮箱
    pub email: Option<String>,
}

impl From<Review> for ReviewResponseDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            completed_at: review.completed_at,
            text: review.text,
            liked: review.liked,
            email: review.reviewer_email,
        }
    }
}

/// 歌曲详情响应
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongResponseDto {
    pub id: Uuid,
    /// 提交者邮箱
    pub email: String,
    pub link: String,
    pub created_at: DateTime<FixedOffset>,
    /// 最近一次评审，没有评审时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewResponseDto>,
}

impl From<(Track, Option<Review>)> for SongResponseDto {
    fn from((track, review): (Track, Option<Review>)) -> Self {
        Self {
            id: track.id,
            email: track.submitter_email,
            link: track.link,
            created_at: track.created_at,
            review: review.map(Into::into),
        }
    }
}

/// 领取评审响应
///
/// 不包含提交者邮箱
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartReviewResponseDto {
    pub id: Uuid,
    pub link: String,
    pub created_at: DateTime<FixedOffset>,
    pub review: ReviewResponseDto,
}

impl From<Assignment> for StartReviewResponseDto {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.track.id,
            link: assignment.track.link,
            created_at: assignment.track.created_at,
            review: assignment.review.into(),
        }
    }
}
