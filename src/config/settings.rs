// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、数据库、评审规则、通知、统计分析和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 评审配置
    pub review: ReviewSettings,
    /// 通知配置
    pub notification: NotificationSettings,
    /// 统计分析配置
    pub analytics: AnalyticsSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 评审配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSettings {
    /// 未完成评审失效时间（分钟），超过后歌曲可重新分配
    pub staleness_window_minutes: i64,
}

impl ReviewSettings {
    /// 失效窗口
    pub fn staleness_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.staleness_window_minutes)
    }
}

/// 通知配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// 邮件中继地址，未设置时仅记录日志
    pub endpoint: Option<String>,
    /// 请求签名密钥
    pub secret: String,
    /// 发件人地址
    pub sender: String,
    /// 前端公开地址，用于生成歌曲链接
    pub public_base_url: String,
}

/// 统计分析配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Mixpanel 项目令牌，未设置时不上报
    pub mixpanel_token: Option<String>,
    /// 事件上报地址
    pub endpoint: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SONGSWAP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default review settings
            .set_default("review.staleness_window_minutes", 60)?
            // Default notification settings
            .set_default("notification.secret", "change-me")?
            .set_default("notification.sender", "no-reply@songswap.app")?
            .set_default("notification.public_base_url", "http://localhost:5173")?
            // Default analytics settings
            .set_default("analytics.endpoint", "https://api.mixpanel.com/track")?
            // Default metrics settings
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}
