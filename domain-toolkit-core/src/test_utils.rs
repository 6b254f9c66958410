//! 测试辅助模块
//!
//! 提供 mock Provider 实现和便捷的上下文工厂方法。
//! 每个 mock 都记录调用次数，用于断言"没有发起网络请求"。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use domain_toolkit_provider::{
    DnsRecord, DnsRecordProvider, DnsRecordRequest, DnsRecordType, DomainAvailability,
    ProviderError, RegistrarDomain, RegistrarProvider, Result,
};
use tokio::sync::RwLock;

use crate::config::{
    AppConfig, ENV_CLOUDFLARE_API_TOKEN, ENV_CLOUDFLARE_DOMAIN, ENV_CLOUDFLARE_ZONE_ID,
    ENV_PORKBUN_API_KEY, ENV_PORKBUN_SECRET_KEY,
};
use crate::services::ServiceContext;

pub const TEST_BASE_DOMAIN: &str = "example.com";
pub const TEST_ZONE_ID: &str = "zone-test";

/// 注册商默认 NS
pub const DEFAULT_NAMESERVERS: [&str; 2] = ["curitiba.ns.porkbun.com", "fortaleza.ns.porkbun.com"];

// ===== MockRegistrar =====

#[derive(Default)]
struct RegistrarState {
    nameservers: HashMap<String, Vec<String>>,
    not_opted_in: HashSet<String>,
    unreachable: HashSet<String>,
    available: HashMap<String, String>,
    fail_next: Option<ProviderError>,
    update_error: Option<String>,
    updates: Vec<(String, Vec<String>)>,
}

/// 内存注册商：`update_nameservers` 写入的列表会被后续 `get_nameservers` 原样返回。
pub struct MockRegistrar {
    calls: AtomicUsize,
    domains: Vec<RegistrarDomain>,
    state: RwLock<RegistrarState>,
}

impl MockRegistrar {
    pub const CALLER_IP: &'static str = "203.0.113.7";

    pub fn with_domains(names: &[&str]) -> Self {
        let domains: Vec<RegistrarDomain> = names
            .iter()
            .map(|name| RegistrarDomain {
                name: (*name).to_string(),
                status: Some("ACTIVE".to_string()),
                expiry: Some("2027-08-20 17:52:51".to_string()),
                expires_at: domain_toolkit_provider::datetime::parse_registrar_datetime(
                    "2027-08-20 17:52:51",
                ),
                tld: name.rsplit('.').next().map(str::to_string),
                auto_renew: None,
                security_lock: None,
                whois_privacy: None,
            })
            .collect();

        let nameservers = names
            .iter()
            .map(|name| {
                (
                    (*name).to_string(),
                    DEFAULT_NAMESERVERS.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();

        Self {
            calls: AtomicUsize::new(0),
            domains,
            state: RwLock::new(RegistrarState {
                nameservers,
                ..RegistrarState::default()
            }),
        }
    }

    /// 已发出的"网络请求"次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn disable_api_access(&self, domain: &str) {
        self.state.write().await.not_opted_in.insert(domain.to_string());
    }

    /// 下一次调用（任意方法）返回网络错误
    pub async fn fail_next_with_network_error(&self) {
        self.state.write().await.fail_next = Some(network_error());
    }

    /// 对该域名的调用始终返回网络错误
    pub async fn fail_domain_with_network_error(&self, domain: &str) {
        self.state.write().await.unreachable.insert(domain.to_string());
    }

    /// `update_nameservers` 以该消息失败
    pub async fn reject_updates(&self, message: &str) {
        self.state.write().await.update_error = Some(message.to_string());
    }

    pub async fn set_available(&self, domain: &str, price: &str) {
        self.state
            .write()
            .await
            .available
            .insert(domain.to_string(), price.to_string());
    }

    /// 已提交的 NS 更新（按提交顺序）
    pub async fn updates(&self) -> Vec<(String, Vec<String>)> {
        self.state.read().await.updates.clone()
    }

    async fn begin(&self, domain: Option<&str>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        if let Some(domain) = domain {
            if state.unreachable.contains(domain) {
                return Err(network_error());
            }
            if state.not_opted_in.contains(domain) {
                return Err(ProviderError::ApiAccessDisabled {
                    provider: "mock".to_string(),
                    domain: domain.to_string(),
                    raw_message: Some("Domain is not opted in to API access.".to_string()),
                });
            }
        }
        Ok(())
    }
}

fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "mock".to_string(),
        detail: "connection refused".to_string(),
    }
}

#[async_trait]
impl RegistrarProvider for MockRegistrar {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn ping(&self) -> Result<String> {
        self.begin(None).await?;
        Ok(Self::CALLER_IP.to_string())
    }

    async fn list_domains(&self) -> Result<Vec<RegistrarDomain>> {
        self.begin(None).await?;
        Ok(self.domains.clone())
    }

    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>> {
        self.begin(Some(domain)).await?;
        self.state
            .read()
            .await
            .nameservers
            .get(domain)
            .cloned()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: "mock".to_string(),
                domain: domain.to_string(),
                raw_message: Some("Invalid domain.".to_string()),
            })
    }

    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        self.begin(Some(domain)).await?;
        let mut state = self.state.write().await;
        if let Some(message) = state.update_error.clone() {
            return Err(ProviderError::Unknown {
                provider: "mock".to_string(),
                raw_code: Some("400".to_string()),
                raw_message: message,
            });
        }
        state
            .updates
            .push((domain.to_string(), nameservers.to_vec()));
        state
            .nameservers
            .insert(domain.to_string(), nameservers.to_vec());
        Ok(())
    }

    async fn check_domain(&self, domain: &str) -> Result<DomainAvailability> {
        self.begin(None).await?;
        let price = self.state.read().await.available.get(domain).cloned();
        Ok(DomainAvailability {
            domain: domain.to_string(),
            available: price.is_some(),
            price,
            regular_price: None,
            premium: false,
        })
    }

    async fn register_domain(&self, domain: &str) -> Result<serde_json::Value> {
        self.begin(None).await?;
        if !self.state.read().await.available.contains_key(domain) {
            return Err(ProviderError::Unknown {
                provider: "mock".to_string(),
                raw_code: Some("400".to_string()),
                raw_message: "Domain is not available.".to_string(),
            });
        }
        Ok(serde_json::json!({ "status": "SUCCESS", "domain": domain, "orderId": 1 }))
    }
}

// ===== MockDnsProvider =====

/// 内存 DNS 记录表
pub struct MockDnsProvider {
    calls: AtomicUsize,
    next_id: AtomicUsize,
    records: RwLock<Vec<DnsRecord>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 预置一条记录（不计入调用次数）
    pub async fn insert(&self, name: &str, record_type: DnsRecordType, content: &str) {
        let record = DnsRecord {
            id: self.allocate_id(),
            record_type,
            name: name.to_string(),
            content: content.to_string(),
            ttl: 1,
            proxied: Some(false),
        };
        self.records.write().await.push(record);
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    fn allocate_id(&self) -> String {
        format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn to_record(id: String, req: &DnsRecordRequest) -> DnsRecord {
        DnsRecord {
            id,
            record_type: req.record_type,
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
            proxied: req.proxied,
        }
    }
}

impl Default for MockDnsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsRecordProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn find_records(
        &self,
        _zone_id: &str,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.record_type == record_type && r.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }

    async fn create_record(&self, _zone_id: &str, req: &DnsRecordRequest) -> Result<DnsRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let record = Self::to_record(self.allocate_id(), req);
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        req: &DnsRecordRequest,
    ) -> Result<DnsRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: "mock".to_string(),
                param: "record_id".to_string(),
                detail: format!("Record does not exist: {record_id}"),
            })?;
        *slot = Self::to_record(record_id.to_string(), req);
        Ok(slot.clone())
    }
}

// ===== 上下文工厂 =====

/// 所有变量都已设置的配置
pub fn full_config() -> AppConfig {
    AppConfig::from_lookup(|key| {
        let value = match key {
            ENV_PORKBUN_API_KEY => "pk1_test",
            ENV_PORKBUN_SECRET_KEY => "sk1_test",
            ENV_CLOUDFLARE_API_TOKEN => "cf_test",
            ENV_CLOUDFLARE_ZONE_ID => TEST_ZONE_ID,
            ENV_CLOUDFLARE_DOMAIN => TEST_BASE_DOMAIN,
            _ => return None,
        };
        Some(value.to_string())
    })
}

pub fn context(
    config: AppConfig,
    registrar: Arc<MockRegistrar>,
    dns_provider: Arc<MockDnsProvider>,
) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(config, registrar, dns_provider))
}

pub fn context_with_registrar(registrar: Arc<MockRegistrar>) -> Arc<ServiceContext> {
    context(full_config(), registrar, Arc::new(MockDnsProvider::new()))
}

pub fn context_with_dns(dns_provider: Arc<MockDnsProvider>) -> Arc<ServiceContext> {
    context(
        full_config(),
        Arc::new(MockRegistrar::with_domains(&[])),
        dns_provider,
    )
}

/// 不含任何凭证的上下文
pub fn context_without_credentials(registrar: Arc<MockRegistrar>) -> Arc<ServiceContext> {
    context(AppConfig::default(), registrar, Arc::new(MockDnsProvider::new()))
}
