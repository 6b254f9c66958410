//! Result types returned by the services

use domain_toolkit_provider::DnsRecord;
use serde::Serialize;

// ===== API access audit =====

/// Why a domain cannot be managed through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum DisabledReason {
    /// The domain is not opted in to API access.
    NotOptedIn,
    /// Any other failure, with its message.
    Other(String),
}

/// API access state of one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum ApiAccessStatus {
    /// API calls succeed; `nameservers` may be empty (registrar defaults).
    Enabled { nameservers: Vec<String> },
    Disabled { reason: DisabledReason },
}

/// One audited domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainAccess {
    pub domain: String,
    pub status: ApiAccessStatus,
}

impl DomainAccess {
    pub fn is_enabled(&self) -> bool {
        matches!(self.status, ApiAccessStatus::Enabled { .. })
    }
}

/// Audit result, in the order the registrar listed the domains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiAccessReport {
    pub entries: Vec<DomainAccess>,
}

impl ApiAccessReport {
    pub fn enabled(&self) -> impl Iterator<Item = &DomainAccess> {
        self.entries.iter().filter(|e| e.is_enabled())
    }

    pub fn disabled(&self) -> impl Iterator<Item = &DomainAccess> {
        self.entries.iter().filter(|e| !e.is_enabled())
    }

    /// Any domain is disabled because it was never opted in.
    pub fn has_not_opted_in(&self) -> bool {
        self.entries.iter().any(|e| {
            matches!(
                e.status,
                ApiAccessStatus::Disabled {
                    reason: DisabledReason::NotOptedIn
                }
            )
        })
    }
}

// ===== DNS record upsert =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpsertAction {
    Created,
    Updated,
}

/// Result of a record upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpsertOutcome {
    pub action: UpsertAction,
    pub record: DnsRecord,
}
