//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

impl<T> CloudflareResponse<T> {
    /// 取第一个错误的 (code, message)
    pub fn first_error(&self) -> (String, String) {
        self.errors.first().map_or_else(
            || (String::new(), "Unknown error".to_string()),
            |e| (e.code.to_string(), e.message.clone()),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    #[serde(default = "auto_ttl")]
    pub ttl: u32,
    #[serde(default)]
    pub proxied: Option<bool>,
}

/// Cloudflare DNS Record 请求体（POST / PUT）
#[derive(Debug, Serialize)]
pub struct CloudflareRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

fn auto_ttl() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_response_exposes_first_error() {
        let resp: CloudflareResponse<serde_json::Value> = serde_json::from_str(
            r#"{"success":false,"result":null,"errors":[{"code":9109,"message":"Unauthorized"}]}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert_eq!(
            resp.first_error(),
            ("9109".to_string(), "Unauthorized".to_string())
        );
    }

    #[test]
    fn missing_errors_fall_back() {
        let resp: CloudflareResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(resp.first_error().1, "Unknown error");
    }

    #[test]
    fn record_body_uses_wire_names() {
        let body = CloudflareRecordBody {
            record_type: "A",
            name: "www.example.com",
            content: "1.2.3.4",
            ttl: 1,
            proxied: Some(false),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], "A");
        assert_eq!(value["proxied"], false);
        assert_eq!(value["ttl"], 1);
    }
}
