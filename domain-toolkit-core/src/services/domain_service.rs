//! 域名可注册性查询与注册

use std::sync::Arc;

use domain_toolkit_provider::DomainAvailability;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_failure};
use crate::validation::validate_domain;

/// 域名注册服务
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 凭证检查（不发起请求），用于在提示用户输入前尽早报错
    pub fn ensure_configured(&self) -> CoreResult<()> {
        self.ctx.require_registrar().map(|_| ())
    }

    /// 查询域名是否可注册及价格
    pub async fn check_availability(&self, domain: &str) -> CoreResult<DomainAvailability> {
        let domain = validate_domain(domain)?;
        let registrar = self.ctx.require_registrar()?;
        registrar
            .check_domain(&domain)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("check_availability({domain})"), e))
    }

    /// 注册域名（使用账户默认联系人），返回注册商原始回执
    ///
    /// 调用方负责在此之前取得用户确认。
    pub async fn register(&self, domain: &str) -> CoreResult<serde_json::Value> {
        let domain = validate_domain(domain)?;
        let registrar = self.ctx.require_registrar()?;
        let receipt = registrar
            .register_domain(&domain)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("register({domain})"), e))?;
        log::info!("Registered {domain}");
        Ok(receipt)
    }
}
