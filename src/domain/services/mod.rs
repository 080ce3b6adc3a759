// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 定义通知和统计分析两个外部协作方的抽象接口
pub mod analytics_service;
pub mod notification_service;
