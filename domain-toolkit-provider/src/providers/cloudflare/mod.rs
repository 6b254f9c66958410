//! Cloudflare DNS record provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse};

/// Public Cloudflare API v4 root.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare DNS record provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    pub fn new(api_token: String) -> Result<Self> {
        Self::with_base_url(api_token, CF_API_BASE)
    }

    pub fn with_base_url(api_token: String, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
            api_token,
            base_url: normalize_base_url(base_url),
        })
    }
}
