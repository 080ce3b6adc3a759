// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::track_repository::RepositoryError;
use thiserror::Error;

/// 互评用例错误类型
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// 当前没有可分配的歌曲，属于正常结果
    #[error("No songs available to review at the moment.")]
    NoTrackAvailable,
    /// 歌曲不存在
    #[error("Track not found")]
    TrackNotFound,
    /// 评审不存在
    #[error("Review not found")]
    ReviewNotFound,
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
