// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::review::Review;
use crate::domain::models::track::Track;
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 歌曲仓库特质
///
/// 定义歌曲数据访问接口
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// 创建新歌曲
    async fn create(&self, track: &Track) -> Result<Track, RepositoryError>;
    /// 根据ID查找歌曲
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, RepositoryError>;
    /// 根据ID查找歌曲及其最近一次评审
    async fn find_with_latest_review(
        &self,
        id: Uuid,
    ) -> Result<Option<(Track, Option<Review>)>, RepositoryError>;
}
