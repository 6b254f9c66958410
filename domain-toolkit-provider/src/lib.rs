//! # domain-toolkit-provider
//!
//! Thin, typed clients for the two remote APIs used by the domain toolkit:
//!
//! | Provider | Feature Flag | Trait | Auth Method |
//! |----------|-------------|-------|-------------|
//! | [Porkbun](https://porkbun.com/api/json/v3/documentation) | `porkbun` | [`RegistrarProvider`] | API key + secret key in every JSON body |
//! | [Cloudflare](https://developers.cloudflare.com/api/) | `cloudflare` | [`DnsRecordProvider`] | Bearer Token |
//!
//! The registrar and the DNS provider do not share a trait: they
//! expose different operations and are used by different tools.
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: Enable both providers.
//! - **`porkbun`** / **`cloudflare`**: Enable a single provider.
//! - **`rustls`** *(default)* / **`native-tls`** — TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_toolkit_provider::{create_registrar, RegistrarCredentials};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = RegistrarCredentials::new("pk1_...", "sk1_...");
//!     let registrar = create_registrar(credentials, None)?;
//!
//!     for domain in registrar.list_domains().await? {
//!         let ns = registrar.get_nameservers(&domain.name).await?;
//!         println!("{} -> {:?}", domain.name, ns);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError).
//! Provider-specific failure text and codes are classified once, inside each
//! provider's error mapper, so callers only ever match on variants such as
//! [`ProviderError::ApiAccessDisabled`]. Nothing is retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
#[cfg(feature = "cloudflare")]
pub use factory::create_dns_provider;
#[cfg(feature = "porkbun")]
pub use factory::create_registrar;

// Re-export public traits only (error mapping stays internal)
pub use traits::{DnsRecordProvider, RegistrarProvider};

// Re-export types
pub use types::{
    DnsRecord, DnsRecordRequest, DnsRecordType, DomainAvailability, RegistrarCredentials,
    RegistrarDomain,
};

// Re-export utils
pub use utils::{datetime, log_sanitizer};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;

#[cfg(feature = "porkbun")]
pub use providers::PorkbunProvider;

#[cfg(feature = "cloudflare")]
pub use providers::CLOUDFLARE_API_BASE;

#[cfg(feature = "porkbun")]
pub use providers::PORKBUN_API_BASE;
