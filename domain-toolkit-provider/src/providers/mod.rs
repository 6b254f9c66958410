//! Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "porkbun")]
mod porkbun;

#[cfg(feature = "cloudflare")]
pub use cloudflare::{CF_API_BASE as CLOUDFLARE_API_BASE, CloudflareProvider};
#[cfg(feature = "porkbun")]
pub use porkbun::{PORKBUN_API_BASE, PorkbunProvider};
