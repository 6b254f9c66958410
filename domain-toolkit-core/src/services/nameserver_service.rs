//! 域名 NS 管理服务

use std::sync::Arc;

use domain_toolkit_provider::RegistrarDomain;

use crate::error::{CoreError, CoreResult};
use crate::reconcile::{NameserverPlan, plan_nameserver_change};
use crate::services::{ServiceContext, log_failure};
use crate::validation::{validate_domain, validate_nameservers};

/// Nameserver synchronizer
///
/// Every call is a single request/response exchange with the registrar.
pub struct NameserverService {
    ctx: Arc<ServiceContext>,
}

impl NameserverService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出账户下的全部域名（保持注册商返回顺序）
    pub async fn list_domains(&self) -> CoreResult<Vec<RegistrarDomain>> {
        let registrar = self.ctx.require_registrar()?;
        let domains = registrar
            .list_domains()
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure("list_domains", e))?;
        log::debug!("Registrar returned {} domain(s)", domains.len());
        Ok(domains)
    }

    /// 获取域名当前的 NS，空列表表示注册商默认 NS
    pub async fn get_nameservers(&self, domain: &str) -> CoreResult<Vec<String>> {
        let domain = validate_domain(domain)?;
        let registrar = self.ctx.require_registrar()?;
        registrar
            .get_nameservers(&domain)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("get_nameservers({domain})"), e))
    }

    /// 提交新的 NS 列表，返回实际提交的（去空白后的）列表
    pub async fn set_nameservers(&self, domain: &str, nameservers: &[String]) -> CoreResult<Vec<String>> {
        let domain = validate_domain(domain)?;
        let nameservers = validate_nameservers(nameservers)?;
        let registrar = self.ctx.require_registrar()?;

        registrar
            .update_nameservers(&domain, &nameservers)
            .await
            .map_err(CoreError::from)
            .inspect_err(|e| log_failure(&format!("set_nameservers({domain})"), e))?;

        log::info!("Nameservers for {domain} updated: {}", nameservers.join(", "));
        Ok(nameservers)
    }

    /// 对比当前与目标 NS（纯计算，不发请求）
    pub fn plan(&self, domain: &str, current: &[String], desired: &[String]) -> CoreResult<NameserverPlan> {
        plan_nameserver_change(domain, current, desired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::reconcile::PlanAction;
    use crate::test_utils::{MockRegistrar, context_with_registrar, context_without_credentials};

    fn ns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn list_domains_preserves_registrar_order() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["zeta.com", "alpha.net", "mid.org"]));
        let service = NameserverService::new(context_with_registrar(registrar.clone()));

        let domains = service.list_domains().await.unwrap();
        let names: Vec<&str> = domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zeta.com", "alpha.net", "mid.org"]);
        assert_eq!(registrar.call_count(), 1);
    }

    #[tokio::test]
    async fn dotless_domain_is_rejected_without_network() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        let service = NameserverService::new(context_with_registrar(registrar.clone()));

        let err = service.get_nameservers("localhost").await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let err = service
            .set_nameservers("localhost", &ns(&["ns1.example.com", "ns2.example.com"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(registrar.call_count(), 0);
    }

    #[tokio::test]
    async fn short_or_long_sets_are_rejected_before_submission() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        let service = NameserverService::new(context_with_registrar(registrar.clone()));

        let err = service
            .set_nameservers("example.com", &ns(&["ns1.example.com"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let five = ns(&["a.x.com", "b.x.com", "c.x.com", "d.x.com", "e.x.com"]);
        let err = service.set_nameservers("example.com", &five).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(registrar.call_count(), 0);
    }

    #[tokio::test]
    async fn not_opted_in_is_distinguished() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["locked.com"]));
        registrar.disable_api_access("locked.com").await;
        let service = NameserverService::new(context_with_registrar(registrar));

        let err = service.get_nameservers("locked.com").await.unwrap_err();
        assert!(err.is_api_access_disabled());
        assert!(matches!(
            err,
            CoreError::ApiError { kind: ApiErrorKind::ApiAccessDisabled, .. }
        ));
    }

    #[tokio::test]
    async fn submitted_set_round_trips_in_order() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        let service = NameserverService::new(context_with_registrar(registrar.clone()));

        let submitted = service
            .set_nameservers("example.com", &ns(&["ns1.example.com", " ns2.example.com"]))
            .await
            .unwrap();
        assert_eq!(submitted, ["ns1.example.com", "ns2.example.com"]);

        let fetched = service.get_nameservers("example.com").await.unwrap();
        assert_eq!(fetched, ["ns1.example.com", "ns2.example.com"]);
        assert_eq!(registrar.call_count(), 2);
    }

    #[tokio::test]
    async fn missing_credentials_fail_every_operation_without_network() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        let service = NameserverService::new(context_without_credentials(registrar.clone()));

        assert!(matches!(
            service.list_domains().await,
            Err(CoreError::ConfigError(_))
        ));
        assert!(matches!(
            service.get_nameservers("example.com").await,
            Err(CoreError::ConfigError(_))
        ));
        assert!(matches!(
            service
                .set_nameservers("example.com", &ns(&["ns1.example.com", "ns2.example.com"]))
                .await,
            Err(CoreError::ConfigError(_))
        ));
        assert_eq!(registrar.call_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_transport_error() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        registrar.fail_next_with_network_error().await;
        let service = NameserverService::new(context_with_registrar(registrar));

        let err = service.list_domains().await.unwrap_err();
        assert!(matches!(err, CoreError::TransportError(_)));
    }

    #[tokio::test]
    async fn plan_reports_no_change_for_identical_set() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["example.com"]));
        let service = NameserverService::new(context_with_registrar(registrar));
        let current = ns(&["ns1.example.com", "ns2.example.com"]);

        let plan = service.plan("example.com", &current, &current).unwrap();
        assert_eq!(plan.action, PlanAction::NoChange);
    }
}
