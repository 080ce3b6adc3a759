// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// 通知服务特质
///
/// 评审完成后通知歌曲提交者
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送评审完成通知
    ///
    /// # 参数
    ///
    /// * `email` - 歌曲提交者邮箱
    /// * `track_id` - 被评审的歌曲ID
    async fn notify(&self, email: &str, track_id: Uuid) -> Result<()>;
}
