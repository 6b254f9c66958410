//! Porkbun RegistrarProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{ErrorContext, ProviderErrorMapper, RegistrarProvider};
use crate::types::{DomainAvailability, RegistrarDomain};
use crate::utils::datetime::parse_registrar_datetime;

use super::PorkbunProvider;
use super::types::{
    CheckDomainPayload, CreateDomainBody, EmptyBody, GetNsPayload, ListAllPayload, PingPayload,
    PorkbunDomain, UpdateNsBody,
};

impl PorkbunProvider {
    /// 将 Porkbun 域名转换为 `RegistrarDomain`
    pub(crate) fn to_registrar_domain(domain: PorkbunDomain) -> RegistrarDomain {
        let expires_at = domain
            .expire_date
            .as_deref()
            .and_then(parse_registrar_datetime);

        RegistrarDomain {
            name: domain.domain,
            status: domain.status,
            expiry: domain.expire_date,
            expires_at,
            tld: domain.tld,
            auto_renew: domain.auto_renew,
            security_lock: domain.security_lock,
            whois_privacy: domain.whois_privacy,
        }
    }

    /// 域名出现在 URL 路径中，按路径段编码
    fn domain_path(operation: &str, domain: &str) -> String {
        format!("/domain/{operation}/{}", urlencoding::encode(domain))
    }
}

#[async_trait]
impl RegistrarProvider for PorkbunProvider {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn ping(&self) -> Result<String> {
        let payload: PingPayload = self
            .post("/ping", &EmptyBody {}, ErrorContext::default())
            .await?;
        Ok(payload.your_ip.unwrap_or_else(|| "unknown".to_string()))
    }

    async fn list_domains(&self) -> Result<Vec<RegistrarDomain>> {
        let payload: ListAllPayload = self
            .post("/domain/listAll", &EmptyBody {}, ErrorContext::default())
            .await?;
        Ok(payload
            .domains
            .into_iter()
            .map(Self::to_registrar_domain)
            .collect())
    }

    async fn get_nameservers(&self, domain: &str) -> Result<Vec<String>> {
        let payload: GetNsPayload = self
            .post(
                &Self::domain_path("getNs", domain),
                &EmptyBody {},
                ErrorContext::for_domain(domain),
            )
            .await?;
        Ok(payload.ns.unwrap_or_default())
    }

    async fn update_nameservers(&self, domain: &str, nameservers: &[String]) -> Result<()> {
        let _: serde_json::Value = self
            .post(
                &Self::domain_path("updateNs", domain),
                &UpdateNsBody { ns: nameservers },
                ErrorContext::for_domain(domain),
            )
            .await?;
        Ok(())
    }

    async fn check_domain(&self, domain: &str) -> Result<DomainAvailability> {
        let payload: CheckDomainPayload = self
            .post(
                &Self::domain_path("checkDomain", domain),
                &EmptyBody {},
                ErrorContext::for_domain(domain),
            )
            .await?;
        let response = payload.response;

        Ok(DomainAvailability {
            domain: domain.to_string(),
            available: response.avail.eq_ignore_ascii_case("yes"),
            price: response.price,
            regular_price: response.regular_price,
            premium: response.premium.unwrap_or(false),
        })
    }

    async fn register_domain(&self, domain: &str) -> Result<serde_json::Value> {
        self.post(
            "/domain/create",
            &CreateDomainBody {
                domain,
                registrant_contact: EmptyBody {},
            },
            ErrorContext::for_domain(domain),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_domain_and_parses_expiry() {
        let raw: PorkbunDomain = serde_json::from_str(
            r#"{"domain":"example.com","status":"ACTIVE","expireDate":"2027-08-20 17:52:51"}"#,
        )
        .unwrap();
        let domain = PorkbunProvider::to_registrar_domain(raw);
        assert_eq!(domain.name, "example.com");
        assert_eq!(domain.status.as_deref(), Some("ACTIVE"));
        assert_eq!(domain.expiry.as_deref(), Some("2027-08-20 17:52:51"));
        assert!(domain.expires_at.is_some());
    }

    #[test]
    fn unparseable_expiry_is_kept_verbatim() {
        let raw: PorkbunDomain =
            serde_json::from_str(r#"{"domain":"example.com","expireDate":"soon"}"#).unwrap();
        let domain = PorkbunProvider::to_registrar_domain(raw);
        assert_eq!(domain.expiry.as_deref(), Some("soon"));
        assert!(domain.expires_at.is_none());
    }

    #[test]
    fn domain_path_encodes_segment() {
        assert_eq!(
            PorkbunProvider::domain_path("getNs", "example.com"),
            "/domain/getNs/example.com"
        );
        assert_eq!(
            PorkbunProvider::domain_path("getNs", "a b.com"),
            "/domain/getNs/a%20b.com"
        );
    }
}
