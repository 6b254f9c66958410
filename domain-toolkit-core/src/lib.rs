//! domain-toolkit core library
//!
//! Business logic shared by the interactive tools:
//! - configuration loaded from the environment ([`AppConfig`])
//! - input validation and the nameserver reconciliation engine
//! - services for nameservers, domain registration, API-access audit and DNS record upsert
//!
//! Nothing here prompts or prints. The front-end drives the services and renders results.

pub mod config;
pub mod error;
pub mod reconcile;
pub mod services;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use config::{AppConfig, CloudflareSettings};
pub use error::{ApiErrorKind, CoreError, CoreResult};
pub use reconcile::{NameserverPlan, PlanAction, plan_nameserver_change};
pub use services::{
    AccessAuditService, DnsRecordService, DomainService, NameserverService, ServiceContext,
};
pub use types::{
    ApiAccessReport, ApiAccessStatus, DisabledReason, DomainAccess, UpsertAction, UpsertOutcome,
};
