// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NotificationSettings;
use crate::domain::services::notification_service::Notifier;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const SUBJECT: &str = "Your Track has been reviewed!";

/// 邮件中继通知实现
///
/// 将签名后的 JSON 消息 POST 到邮件中继，由中继负责实际投递
pub struct HttpNotifier {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 中继地址
    endpoint: String,
    /// 签名密钥
    secret: String,
    /// 发件人地址
    sender: String,
    /// 前端公开地址
    public_base_url: String,
}

impl HttpNotifier {
    /// 创建新的中继通知实现
    pub fn new(endpoint: String, settings: &NotificationSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint,
            secret: settings.secret.clone(),
            sender: settings.sender.clone(),
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 为负载生成签名
    fn generate_signature(&self, payload: &str, timestamp: i64) -> Result<String> {
        let message = format!("{}.{}", timestamp, payload);
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| anyhow!("Invalid signing key: {}", e))?;
        mac.update(message.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, email: &str, track_id: Uuid) -> Result<()> {
        let payload = json!({
            "from": self.sender,
            "to": email,
            "subject": SUBJECT,
            "text": format!(
                "Someone just reviewed your track. Read the review at {}/song/{}",
                self.public_base_url, track_id
            ),
            "trackId": track_id,
        });
        let timestamp = chrono::Utc::now().timestamp();
        let payload_str = serde_json::to_string(&payload)?;
        let signature = self.generate_signature(&payload_str, timestamp)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("X-Songswap-Signature", signature)
            .header("X-Songswap-Timestamp", timestamp.to_string())
            .body(payload_str)
            .send()
            .await?;

        if response.status().is_success() {
            debug!(%track_id, "Review notification accepted by relay");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!(
                "Notification relay rejected message with status {}: {}",
                status,
                body
            ))
        }
    }
}

/// 仅记录日志的通知实现，未配置邮件中继时使用
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, email: &str, track_id: Uuid) -> Result<()> {
        info!(to = %email, %track_id, subject = SUBJECT, "No relay configured, notification logged only");
        Ok(())
    }
}
