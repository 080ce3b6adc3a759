// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// 统计分析事件接收端特质
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// 上报一个事件
    ///
    /// # 参数
    ///
    /// * `event` - 事件名称
    /// * `properties` - 事件属性（JSON 对象）
    async fn track(&self, event: &str, properties: Value) -> Result<()>;
}

/// 在后台上报事件，不等待结果
///
/// 上报失败只记录日志，不影响调用方
pub fn track_detached(sink: Arc<dyn AnalyticsSink>, event: &'static str, properties: Value) {
    tokio::spawn(async move {
        if let Err(e) = sink.track(event, properties).await {
            metrics::counter!("songswap_analytics_failures_total").increment(1);
            warn!(event, error = %e, "Failed to push analytics event");
        }
    });
}
