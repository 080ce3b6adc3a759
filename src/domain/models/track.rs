// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Review;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 歌曲实体
///
/// 用户提交的一首待评审歌曲。创建后不可修改，也不会被删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// 歌曲唯一标识符
    pub id: Uuid,
    /// 歌曲外链（SoundCloud）
    pub link: String,
    /// 提交者邮箱
    pub submitter_email: String,
    /// 提交时间
    pub created_at: DateTime<FixedOffset>,
}

impl Track {
    /// 创建一首新歌曲
    ///
    /// 邮箱会被规范化，保证与评审者邮箱的比较不受大小写影响
    pub fn new(link: String, submitter_email: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            link: link.trim().to_string(),
            submitter_email: normalize_email(submitter_email),
            created_at: Utc::now().into(),
        }
    }

    /// 判断歌曲在给定评审历史下能否被重新分配
    ///
    /// 只看最近一次评审：没有评审记录，或最近一次评审未完成且已超过失效窗口时返回 true
    pub fn is_claimable(
        history: &[Review],
        now: DateTime<FixedOffset>,
        staleness_window: Duration,
    ) -> bool {
        history
            .iter()
            .max_by_key(|review| review.created_at)
            .map_or(true, |latest| !latest.blocks_assignment(now, staleness_window))
    }

    /// 判断该歌曲是否由指定请求者提交
    pub fn is_submitted_by(&self, requester_email: Option<&str>) -> bool {
        requester_email.is_some_and(|email| normalize_email(email) == self.submitter_email)
    }
}

/// 规范化邮箱地址
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
