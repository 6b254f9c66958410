//! API 访问权限审计
//!
//! 逐个域名调用 getNs，按结果判断该域名是否已开启 API 访问。

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_failure};
use crate::types::{ApiAccessReport, ApiAccessStatus, DisabledReason, DomainAccess};

/// API access audit service
pub struct AccessAuditService {
    ctx: Arc<ServiceContext>,
}

impl AccessAuditService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 连通性与凭证检查，返回注册商看到的调用方 IP
    pub async fn ping(&self) -> CoreResult<String> {
        let registrar = self.ctx.require_registrar()?;
        registrar
            .ping()
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure("ping", e))
    }

    /// 审计全部域名（顺序执行，保持列表顺序）
    ///
    /// 列出域名失败时直接返回错误；单个域名的失败记录在报告里，不中断审计。
    pub async fn audit(&self) -> CoreResult<ApiAccessReport> {
        let registrar = self.ctx.require_registrar()?;
        let domains = registrar
            .list_domains()
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure("audit: list_domains", e))?;

        let mut report = ApiAccessReport::default();
        for domain in domains {
            let status = match registrar.get_nameservers(&domain.name).await {
                Ok(nameservers) => ApiAccessStatus::Enabled { nameservers },
                Err(e) => {
                    let err = CoreError::from(e);
                    log_failure(&format!("audit: get_nameservers({})", domain.name), &err);
                    let reason = if err.is_api_access_disabled() {
                        DisabledReason::NotOptedIn
                    } else {
                        DisabledReason::Other(err.to_string())
                    };
                    ApiAccessStatus::Disabled { reason }
                }
            };
            report.entries.push(DomainAccess {
                domain: domain.name,
                status,
            });
        }
        Ok(report)
    }
}
