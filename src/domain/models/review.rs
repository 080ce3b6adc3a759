// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::track::{normalize_email, Track};
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 评审实体
///
/// 一次分配记录及其评审结果。`completed_at` 为空表示评审进行中或已被放弃。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// 评审唯一标识符
    pub id: Uuid,
    /// 被评审的歌曲ID
    pub track_id: Uuid,
    /// 评审者邮箱，匿名请求时为空
    pub reviewer_email: Option<String>,
    /// 分配时间
    pub created_at: DateTime<FixedOffset>,
    /// 完成时间
    pub completed_at: Option<DateTime<FixedOffset>>,
    /// 评审正文
    pub text: Option<String>,
    /// 评审者是否喜欢这首歌
    pub liked: Option<bool>,
    /// 已通知提交者的时间
    pub notified_at: Option<DateTime<FixedOffset>>,
}

impl Review {
    /// 为歌曲创建一条新的分配记录
    pub fn claim(
        track_id: Uuid,
        reviewer_email: Option<String>,
        claimed_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            track_id,
            reviewer_email: reviewer_email.as_deref().map(normalize_email),
            created_at: claimed_at,
            completed_at: None,
            text: None,
            liked: None,
            notified_at: None,
        }
    }

    /// 评审是否已完成
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// 该评审是否阻止歌曲被再次分配
    ///
    /// 已完成的评审永久阻止；未完成的评审在失效窗口内阻止
    pub fn blocks_assignment(&self, now: DateTime<FixedOffset>, staleness_window: Duration) -> bool {
        self.is_completed() || now - self.created_at <= staleness_window
    }
}

/// 一次成功的分配结果
#[derive(Debug, Clone)]
pub struct Assignment {
    /// 分配到的歌曲
    pub track: Track,
    /// 新建的评审记录
    pub review: Review,
}
