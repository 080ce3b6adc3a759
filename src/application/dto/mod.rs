// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义歌曲互评接口的请求与响应对象
pub mod song_request;
pub mod song_response;
