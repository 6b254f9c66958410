//! 业务逻辑服务层

mod access_audit_service;
mod dns_record_service;
mod domain_service;
mod nameserver_service;

pub use access_audit_service::AccessAuditService;
pub use dns_record_service::DnsRecordService;
pub use domain_service::DomainService;
pub use nameserver_service::NameserverService;

use std::sync::Arc;

use domain_toolkit_provider::{DnsRecordProvider, RegistrarProvider};

use crate::config::AppConfig;
use crate::error::{CoreError, CoreResult};

/// 服务上下文 - 持有配置和 Provider 客户端
///
/// 前端在启动时创建一次，各服务共享。
pub struct ServiceContext {
    /// 启动时读取的配置（只读）
    pub config: AppConfig,
    /// 注册商客户端
    pub registrar: Arc<dyn RegistrarProvider>,
    /// DNS 记录客户端
    pub dns_provider: Arc<dyn DnsRecordProvider>,
}

impl ServiceContext {
    /// 使用给定的客户端创建上下文（测试时注入 mock）
    #[must_use]
    pub fn new(
        config: AppConfig,
        registrar: Arc<dyn RegistrarProvider>,
        dns_provider: Arc<dyn DnsRecordProvider>,
    ) -> Self {
        Self {
            config,
            registrar,
            dns_provider,
        }
    }

    /// 根据配置创建真实的 HTTP 客户端
    ///
    /// 凭证缺失时仍然可以创建；各服务在发起请求前会检查并返回 `ConfigError`。
    pub fn from_config(config: AppConfig) -> CoreResult<Self> {
        let registrar = domain_toolkit_provider::create_registrar(
            config.registrar_credentials_or_empty(),
            config.porkbun_api_url.as_deref(),
        )?;
        let dns_provider = domain_toolkit_provider::create_dns_provider(
            config.cloudflare_token_or_empty(),
            config.cloudflare_api_url.as_deref(),
        )?;
        Ok(Self::new(config, registrar, dns_provider))
    }

    /// 注册商凭证检查：缺失时不发起任何请求
    pub(crate) fn require_registrar(&self) -> CoreResult<&Arc<dyn RegistrarProvider>> {
        self.config.registrar_credentials()?;
        Ok(&self.registrar)
    }
}

/// 按 `is_expected()` 选择日志级别
pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
}
