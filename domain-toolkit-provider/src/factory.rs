//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::{DnsRecordProvider, RegistrarProvider};
use crate::types::RegistrarCredentials;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "porkbun")]
use crate::providers::PorkbunProvider;

/// Creates the registrar client from a credential pair.
///
/// `base_url` overrides the public API root (used to point at a mock server).
///
/// # Examples
///
/// ```rust,no_run
/// use domain_toolkit_provider::{create_registrar, RegistrarCredentials};
///
/// let registrar = create_registrar(RegistrarCredentials::new("pk1_...", "sk1_..."), None).unwrap();
/// assert_eq!(registrar.id(), "porkbun");
/// ```
#[cfg(feature = "porkbun")]
pub fn create_registrar(
    credentials: RegistrarCredentials,
    base_url: Option<&str>,
) -> Result<Arc<dyn RegistrarProvider>> {
    let provider = match base_url {
        Some(url) => PorkbunProvider::with_base_url(credentials, url)?,
        None => PorkbunProvider::new(credentials)?,
    };
    Ok(Arc::new(provider))
}

/// Creates the DNS record client from an API token.
///
/// `base_url` overrides the public API root (used to point at a mock server).
#[cfg(feature = "cloudflare")]
pub fn create_dns_provider(
    api_token: String,
    base_url: Option<&str>,
) -> Result<Arc<dyn DnsRecordProvider>> {
    let provider = match base_url {
        Some(url) => CloudflareProvider::with_base_url(api_token, url)?,
        None => CloudflareProvider::new(api_token)?,
    };
    Ok(Arc::new(provider))
}
