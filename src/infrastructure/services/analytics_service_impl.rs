// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::analytics_service::AnalyticsSink;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Mixpanel 事件上报实现
pub struct MixpanelSink {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 上报地址
    endpoint: String,
    /// 项目令牌
    token: String,
}

impl MixpanelSink {
    pub fn new(endpoint: String, token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint,
            token,
        }
    }

    /// 组装 Mixpanel 事件，附加令牌和时间戳
    fn build_event(&self, event: &str, properties: Value) -> Value {
        let mut properties = match properties {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        properties.insert("token".to_string(), json!(self.token));
        properties
            .entry("time")
            .or_insert_with(|| json!(chrono::Utc::now().timestamp_millis()));

        json!([{ "event": event, "properties": properties }])
    }
}

#[async_trait]
impl AnalyticsSink for MixpanelSink {
    async fn track(&self, event: &str, properties: Value) -> Result<()> {
        let body = self.build_event(event, properties);
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(anyhow!(
                "Mixpanel rejected event '{}' with status {}",
                event,
                response.status()
            ))
        }
    }
}

/// 不上报任何事件的实现，未配置令牌时使用
pub struct NoopAnalyticsSink;

#[async_trait]
impl AnalyticsSink for NoopAnalyticsSink {
    async fn track(&self, event: &str, _properties: Value) -> Result<()> {
        debug!(event, "Analytics disabled, event dropped");
        Ok(())
    }
}
