// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// SoundCloud 链接格式，协议和子域名可省略
pub static SOUNDCLOUD_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.|m\.|on\.)?soundcloud\.com/\S+$").expect("valid regex")
});

/// 评审正文最大长度（字符）
pub const MAX_REVIEW_TEXT_LENGTH: u64 = 5000;

/// 提交歌曲请求
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SubmitSongRequestDto {
    /// SoundCloud 链接
    #[validate(regex(path = *SOUNDCLOUD_LINK, message = "link must be a SoundCloud URL"))]
    pub link: String,
    /// 提交者邮箱
    #[validate(email(message = "email is invalid"))]
    pub email: String,
}

/// 领取评审请求
///
/// 邮箱可省略，匿名请求者可以领取任何人的歌曲
#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct StartReviewRequestDto {
    /// 请求者邮箱
    #[validate(email(message = "email is invalid"))]
    pub email: Option<String>,
}

/// 提交评审请求
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequestDto {
    /// 评审ID
    pub review_id: Uuid,
    /// 评审正文
    #[validate(length(min = 1, max = MAX_REVIEW_TEXT_LENGTH, message = "text must be between 1 and 5000 characters"))]
    pub text: String,
    /// 是否喜欢
    pub liked: Option<bool>,
}
