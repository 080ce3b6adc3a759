// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::{Assignment, Review};
use crate::domain::repositories::track_repository::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 评审仓库特质
///
/// 定义评审分配与完成的数据访问接口
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// 为请求者原子地领取下一首可评审的歌曲
    ///
    /// 选择与插入评审记录在同一个数据库事务内完成，并发请求不会领取到同一首歌。
    /// 只尝试一次，失败时返回 `None`，不重试。
    async fn claim_next(
        &self,
        requester_email: Option<&str>,
    ) -> Result<Option<Assignment>, RepositoryError>;
    /// 根据ID查找评审
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, RepositoryError>;
    /// 提交评审内容，首次完成时间只写入一次
    async fn complete(
        &self,
        id: Uuid,
        text: String,
        liked: Option<bool>,
    ) -> Result<Review, RepositoryError>;
    /// 设置通知标记，只有第一次调用返回 true
    async fn mark_notified(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
