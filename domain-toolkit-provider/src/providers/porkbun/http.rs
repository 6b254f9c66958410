//! Porkbun HTTP 请求方法
//!
//! Porkbun 所有接口都是 POST + JSON，凭证放在请求体里。

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::PorkbunProvider;
use super::types::{PorkbunAuth, PorkbunEnvelope};

impl PorkbunProvider {
    /// 执行 POST 请求并解析成功响应
    ///
    /// `path` 形如 `/domain/getNs/example.com`，只用于拼接 URL 和日志，不含凭证。
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, context: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        if !self.credentials.is_complete() {
            return Err(ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some("API key or secret key is empty".to_string()),
            });
        }

        let url = format!("{}{path}", self.base_url);
        let payload = PorkbunAuth {
            apikey: &self.credentials.api_key,
            secretapikey: &self.credentials.secret_key,
            body,
        };

        let request = self.client.post(&url).json(&payload);
        let (status_code, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", path).await?;

        // 非 2xx 且非 JSON 的响应（网关页面等）按 HTTP 状态映射
        let value: serde_json::Value = if HttpUtils::is_success(status_code) {
            HttpUtils::parse_json(&response_text, self.provider_name())?
        } else if let Ok(value) = serde_json::from_str(&response_text) {
            value
        } else {
            let message = if response_text.trim().is_empty() {
                format!("HTTP {status_code}")
            } else {
                response_text
            };
            return Err(self.map_error(
                RawApiError::with_code(status_code.to_string(), message),
                context,
            ));
        };

        let envelope: PorkbunEnvelope =
            serde_json::from_value(value.clone()).map_err(|e| self.parse_error(e))?;

        if !envelope.is_success() || !HttpUtils::is_success(status_code) {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("HTTP {status_code}: status {}", envelope.status));
            log::debug!("[{}] API error on {path}: {message}", self.provider_name());
            return Err(self.map_error(
                RawApiError::with_code(status_code.to_string(), message),
                context,
            ));
        }

        serde_json::from_value(value).map_err(|e| self.parse_error(e))
    }
}
