use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{DnsRecord, DnsRecordRequest, DnsRecordType, DomainAvailability, RegistrarDomain};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 数字码，或 HTTP 状态码）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 域名或 zone ID（用于 `ApiAccessDisabled` / `DomainNotFound`）
    pub domain: Option<String>,
    /// 记录名称（用于参数错误的提示）
    pub record_name: Option<String>,
}

impl ErrorContext {
    pub fn for_domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_name: None,
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
///
/// 各 Provider 在这里把原始消息/错误码一次性映射到统一错误类型，
/// 上层只匹配变体，不再做字符串判断。
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 域名注册商 Trait
///
/// 每个方法对应一次请求/响应交换，不做重试。
#[async_trait]
pub trait RegistrarProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 连通性与凭证检查，返回注册商看到的调用方 IP
    async fn ping(&self) -> Result<String>;

    /// 获取账户下全部域名（保持 API 返回顺序）
    async fn list_domains(&self) -> Result<Vec<RegistrarDomain>>;

    /// 获取域名当前的权威 NS（空列表表示使用注册商默认 NS）
    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>>;

    /// 提交新的 NS 列表（顺序原样保留）
    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()>;

    /// 查询域名是否可注册及价格
    async fn check_domain(&self, domain: &str) -> Result<DomainAvailability>;

    /// 注册域名，返回注册商原始回执
    async fn register_domain(&self, domain: &str) -> Result<serde_json::Value>;
}

/// DNS 记录 Provider Trait
#[async_trait]
pub trait DnsRecordProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 按完整名称与类型查找记录
    async fn find_records(
        &self,
        zone_id: &str,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Vec<DnsRecord>>;

    /// 创建 DNS 记录
    async fn create_record(&self, zone_id: &str, req: &DnsRecordRequest) -> Result<DnsRecord>;

    /// 覆盖更新 DNS 记录
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        req: &DnsRecordRequest,
    ) -> Result<DnsRecord>;
}
