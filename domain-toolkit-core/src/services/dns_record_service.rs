//! DNS 记录创建或更新

use std::sync::Arc;

use domain_toolkit_provider::{DnsRecordRequest, DnsRecordType};

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_failure};
use crate::types::{UpsertAction, UpsertOutcome};
use crate::validation::validate_record_input;

/// TTL `1` means automatic.
pub const AUTO_TTL: u32 = 1;

/// DNS record upsert service
pub struct DnsRecordService {
    ctx: Arc<ServiceContext>,
}

impl DnsRecordService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Zone apex configured for the updater, if any.
    pub fn base_domain(&self) -> CoreResult<String> {
        Ok(self.ctx.config.cloudflare_settings()?.base_domain)
    }

    /// 创建或覆盖一条记录
    ///
    /// `name` 为子域名标签，`@` 表示根域名。已有同名同类型记录时更新第一条，否则新建。
    pub async fn upsert(
        &self,
        name: &str,
        record_type: DnsRecordType,
        content: &str,
        proxied: bool,
    ) -> CoreResult<UpsertOutcome> {
        validate_record_input(name, content)?;
        let settings = self.ctx.config.cloudflare_settings()?;
        let fqdn = full_name(name, &settings.base_domain);
        let provider = &self.ctx.dns_provider;

        let request = DnsRecordRequest {
            record_type,
            name: fqdn.clone(),
            content: content.trim().to_string(),
            ttl: AUTO_TTL,
            proxied: Some(proxied),
        };

        let existing = provider
            .find_records(&settings.zone_id, &fqdn, record_type)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("find_records({fqdn})"), e))?;

        let outcome = if let Some(current) = existing.first() {
            log::debug!("Updating {record_type} {fqdn} (id {})", current.id);
            let record = provider
                .update_record(&settings.zone_id, &current.id, &request)
                .await
                .map_err(CoreError::from)
                .inspect_err(|e| log_failure(&format!("update_record({fqdn})"), e))?;
            UpsertOutcome {
                action: UpsertAction::Updated,
                record,
            }
        } else {
            log::debug!("Creating {record_type} {fqdn}");
            let record = provider
                .create_record(&settings.zone_id, &request)
                .await
                .map_err(CoreError::from)
                .inspect_err(|e| log_failure(&format!("create_record({fqdn})"), e))?;
            UpsertOutcome {
                action: UpsertAction::Created,
                record,
            }
        };

        Ok(outcome)
    }
}

/// `@` → apex, otherwise `label.apex`
fn full_name(name: &str, base_domain: &str) -> String {
    let name = name.trim().trim_end_matches('.');
    if name == "@" || name.eq_ignore_ascii_case(base_domain) {
        base_domain.to_string()
    } else {
        format!("{name}.{base_domain}")
    }
}
