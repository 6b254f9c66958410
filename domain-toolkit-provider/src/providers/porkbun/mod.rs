//! Porkbun registrar provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};
use crate::types::RegistrarCredentials;

/// Public Porkbun JSON API v3 root.
pub const PORKBUN_API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// Porkbun registrar provider
pub struct PorkbunProvider {
    pub(crate) client: Client,
    pub(crate) credentials: RegistrarCredentials,
    pub(crate) base_url: String,
}

impl PorkbunProvider {
    pub fn new(credentials: RegistrarCredentials) -> Result<Self> {
        Self::with_base_url(credentials, PORKBUN_API_BASE)
    }

    pub fn with_base_url(credentials: RegistrarCredentials, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client("porkbun")?,
            credentials,
            base_url: normalize_base_url(base_url),
        })
    }
}
