// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 基于 SeaORM 的歌曲与评审仓库实现
pub mod review_repo_impl;
pub mod track_repo_impl;
