use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};

// ============ Credentials ============

/// Registrar API credential pair.
///
/// Both values are opaque strings sent in the body of every registrar request.
/// `Debug` output masks them.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarCredentials {
    /// API key (`apikey` on the wire).
    pub api_key: String,
    /// Secret API key (`secretapikey` on the wire).
    pub secret_key: String,
}

impl RegistrarCredentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Both halves are present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.secret_key.trim().is_empty()
    }
}

impl std::fmt::Debug for RegistrarCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarCredentials")
            .field("api_key", &crate::log_sanitizer::mask_secret(&self.api_key))
            .field(
                "secret_key",
                &crate::log_sanitizer::mask_secret(&self.secret_key),
            )
            .finish()
    }
}

// ============ Registrar Types ============

/// A domain held in the registrar account.
///
/// Status and expiry are kept exactly as the registrar reports them; `expires_at`
/// is only filled when the expiry string could be parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarDomain {
    /// Fully-qualified domain name (e.g., `"example.com"`).
    pub name: String,
    /// Registrar-defined status string (e.g., `"ACTIVE"`).
    pub status: Option<String>,
    /// Expiry date string as returned by the registrar.
    pub expiry: Option<String>,
    /// Parsed expiry, when the registrar format was recognized.
    #[serde(with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Top-level domain, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld: Option<String>,
    /// Auto-renew flag, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
    /// Registrar transfer lock, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_lock: Option<bool>,
    /// WHOIS privacy flag, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_privacy: Option<bool>,
}

/// Result of a registration availability check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailability {
    /// Domain that was checked.
    pub domain: String,
    /// Whether the domain can be registered.
    pub available: bool,
    /// First-year price in USD, as the registrar formats it (e.g., `"9.68"`).
    pub price: Option<String>,
    /// Regular (non-promotional) price in USD, if reported.
    pub regular_price: Option<String>,
    /// Premium-priced name.
    pub premium: bool,
}

impl DomainAvailability {
    /// Registrar prices are always quoted in USD.
    pub const CURRENCY: &'static str = "USD";
}

// ============ DNS Record Types ============

/// Record types supported by the DNS updater.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Text record.
    Txt,
    /// Mail exchange record.
    Mx,
}

impl DnsRecordType {
    /// All supported types, in menu order.
    pub const ALL: [Self; 5] = [Self::A, Self::Aaaa, Self::Cname, Self::Txt, Self::Mx];

    /// Wire name of the record type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
        }
    }

    /// Parse a record type name (case-insensitive).
    pub fn parse(value: &str, provider: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "TXT" => Ok(Self::Txt),
            "MX" => Ok(Self::Mx),
            _ => Err(ProviderError::InvalidParameter {
                provider: provider.to_string(),
                param: "record_type".to_string(),
                detail: format!("Unsupported record type: {value}"),
            }),
        }
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Record type.
    pub record_type: DnsRecordType,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content (address, target, text, ...).
    pub content: String,
    /// Time to live in seconds (`1` = automatic).
    pub ttl: u32,
    /// Whether the provider's proxy is enabled, if the provider has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

/// Request body for creating or overwriting a DNS record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecordRequest {
    /// Record type.
    pub record_type: DnsRecordType,
    /// Fully-qualified record name.
    pub name: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds (`1` = automatic).
    pub ttl: u32,
    /// Enable the provider's proxy.
    pub proxied: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_parse_is_case_insensitive() {
        assert_eq!(DnsRecordType::parse("aaaa", "t").unwrap(), DnsRecordType::Aaaa);
        assert_eq!(DnsRecordType::parse(" cname ", "t").unwrap(), DnsRecordType::Cname);
    }

    #[test]
    fn record_type_parse_rejects_unsupported() {
        let err = DnsRecordType::parse("SRV", "cloudflare").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { param, .. } if param == "record_type"
        ));
    }

    #[test]
    fn record_type_serializes_uppercase() {
        let json = serde_json::to_string(&DnsRecordType::Aaaa).unwrap();
        assert_eq!(json, "\"AAAA\"");
    }

    #[test]
    fn credentials_completeness() {
        assert!(RegistrarCredentials::new("pk1", "sk1").is_complete());
        assert!(!RegistrarCredentials::new("pk1", "  ").is_complete());
        assert!(!RegistrarCredentials::new("", "sk1").is_complete());
    }

    #[test]
    fn credentials_debug_masks_secrets() {
        let creds = RegistrarCredentials::new("pk1_abcdefghijkl", "sk1_mnopqrstuvwx");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("abcdefghijkl"));
        assert!(!debug.contains("mnopqrstuvwx"));
    }
}
