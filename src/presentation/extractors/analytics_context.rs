// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::user_agent;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;

/// 前端为每个访客生成的匿名ID
const DISTINCT_ID_HEADER: &str = "BtsUuid";

/// 请求统计上下文
///
/// 从请求头（User-Agent、CloudFront 地理信息头、访客ID）中解析，字段名与 Mixpanel 属性一致
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsContext {
    #[serde(rename = "$device", skip_serializing_if = "Option::is_none")]
    pub device: Option<&'static str>,
    #[serde(rename = "$os", skip_serializing_if = "Option::is_none")]
    pub os: Option<&'static str>,
    #[serde(rename = "$browser", skip_serializing_if = "Option::is_none")]
    pub browser: Option<&'static str>,
    #[serde(rename = "$browser_version", skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<f64>,
    #[serde(rename = "$ip", skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(rename = "$longitude", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(rename = "$latitude", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(rename = "$city", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "$country", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_id: Option<String>,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn flag(headers: &HeaderMap, name: &str) -> bool {
    header(headers, name).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// 去掉 `地址:端口` 中的端口
///
/// IPv6 只有带方括号时才带端口，裸 IPv6 地址原样返回
fn strip_port(address: &str) -> &str {
    let address = address.trim();
    if let Some(rest) = address.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match address.split_once(':') {
        Some((host, port))
            if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            host
        }
        _ => address,
    }
}

impl AnalyticsContext {
    /// 从请求头解析统计上下文
    pub fn parse(headers: &HeaderMap) -> Self {
        let agent = header(headers, "user-agent").unwrap_or_default();

        let device = if flag(headers, "CloudFront-Is-Desktop-Viewer") {
            Some("Desktop")
        } else if flag(headers, "CloudFront-Is-Mobile-Viewer") {
            Some("Mobile")
        } else if flag(headers, "CloudFront-Is-Tablet-Viewer") {
            Some("Tablet")
        } else {
            user_agent::device(&agent)
        };

        let ip = header(headers, "CloudFront-Viewer-Address")
            .map(|address| strip_port(&address).to_string())
            .or_else(|| {
                header(headers, "X-Forwarded-For")
                    .and_then(|list| list.split(',').next().map(|ip| ip.trim().to_string()))
            })
            .or_else(|| header(headers, "X-Real-IP"))
            .filter(|ip| !ip.is_empty());

        Self {
            device,
            os: user_agent::os(&agent),
            browser: user_agent::browser(&agent),
            browser_version: user_agent::browser_version(&agent),
            ip,
            longitude: header(headers, "CloudFront-Viewer-Longitude"),
            latitude: header(headers, "CloudFront-Viewer-Latitude"),
            city: header(headers, "CloudFront-Viewer-City"),
            country: header(headers, "CloudFront-Viewer-Country-Region-Name"),
            timezone: header(headers, "CloudFront-Viewer-Time-Zone"),
            distinct_id: header(headers, DISTINCT_ID_HEADER),
        }
    }

    /// 合并上下文与事件自身的属性
    pub fn properties(&self, extra: Value) -> Value {
        let mut properties = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        if let Value::Object(extra) = extra {
            properties.extend(extra);
        }
        Value::Object(properties)
    }
}

impl<S> FromRequestParts<S> for AnalyticsContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::parse(&parts.headers))
    }
}
