// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 歌曲仓库（track_repository）：管理歌曲的提交与查询
/// - 评审仓库（review_repository）：管理评审的原子分配与完成
pub mod review_repository;
pub mod track_repository;
