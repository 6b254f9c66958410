//! Environment-backed configuration
//!
//! Built once at startup and handed to [`ServiceContext`](crate::ServiceContext).
//! A `.env` file in the working directory is read first; variables already set in
//! the process environment take precedence.

use std::path::Path;

use domain_toolkit_provider::RegistrarCredentials;

use crate::error::{CoreError, CoreResult};

pub const ENV_PORKBUN_API_KEY: &str = "PORKBUN_API_KEY";
pub const ENV_PORKBUN_SECRET_KEY: &str = "PORKBUN_SECRET_KEY";
pub const ENV_PORKBUN_API_URL: &str = "PORKBUN_API_URL";
pub const ENV_CLOUDFLARE_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_CLOUDFLARE_ZONE_ID: &str = "CLOUDFLARE_ZONE_ID";
pub const ENV_CLOUDFLARE_DOMAIN: &str = "CLOUDFLARE_DOMAIN";
pub const ENV_CLOUDFLARE_API_URL: &str = "CLOUDFLARE_API_URL";

/// Settings for the DNS record updater.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudflareSettings {
    pub api_token: String,
    pub zone_id: String,
    /// Zone apex, e.g. `example.com`.
    pub base_domain: String,
}

impl std::fmt::Debug for CloudflareSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareSettings")
            .field(
                "api_token",
                &domain_toolkit_provider::log_sanitizer::mask_secret(&self.api_token),
            )
            .field("zone_id", &self.zone_id)
            .field("base_domain", &self.base_domain)
            .finish()
    }
}

/// Process configuration. Every value is optional here; the accessors report
/// what is missing when an operation needs it.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    porkbun_api_key: Option<String>,
    porkbun_secret_key: Option<String>,
    /// Registrar API root override.
    pub porkbun_api_url: Option<String>,
    cloudflare_api_token: Option<String>,
    cloudflare_zone_id: Option<String>,
    cloudflare_domain: Option<String>,
    /// DNS provider API root override.
    pub cloudflare_api_url: Option<String>,
    /// `.env` existed but could not be fully read.
    env_file_error: Option<String>,
}

impl AppConfig {
    /// Load `.env` (if present) and read the process environment.
    ///
    /// A `.env` parse failure is kept on the config (see
    /// [`env_file_error`](Self::env_file_error)); nothing is logged here.
    pub fn from_env() -> Self {
        Self::after_env_file(dotenvy::dotenv().map(|_| ()))
    }

    /// Same as [`from_env`](Self::from_env) with an explicit `.env` location.
    pub fn from_env_file(path: &Path) -> Self {
        Self::after_env_file(dotenvy::from_path(path))
    }

    fn after_env_file(loaded: dotenvy::Result<()>) -> Self {
        let env_file_error = match loaded {
            Ok(()) => None,
            Err(e) if e.not_found() => None,
            // dotenvy stops at the first bad line; later entries are never set
            Err(e) => Some(format!(
                ".env file could not be fully loaded ({e}); variables after that line were skipped"
            )),
        };
        Self {
            env_file_error,
            ..Self::from_lookup(|key| std::env::var(key).ok())
        }
    }

    /// Problem reading `.env`, if there was one.
    pub fn env_file_error(&self) -> Option<&str> {
        self.env_file_error.as_deref()
    }

    /// Build from an arbitrary key lookup. Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            porkbun_api_key: get(ENV_PORKBUN_API_KEY),
            porkbun_secret_key: get(ENV_PORKBUN_SECRET_KEY),
            porkbun_api_url: get(ENV_PORKBUN_API_URL),
            cloudflare_api_token: get(ENV_CLOUDFLARE_API_TOKEN),
            cloudflare_zone_id: get(ENV_CLOUDFLARE_ZONE_ID),
            cloudflare_domain: get(ENV_CLOUDFLARE_DOMAIN),
            cloudflare_api_url: get(ENV_CLOUDFLARE_API_URL),
            env_file_error: None,
        }
    }

    /// Registrar credential pair, or `ConfigError` naming every missing variable.
    pub fn registrar_credentials(&self) -> CoreResult<RegistrarCredentials> {
        match (&self.porkbun_api_key, &self.porkbun_secret_key) {
            (Some(key), Some(secret)) => Ok(RegistrarCredentials::new(key, secret)),
            _ => Err(missing(&[
                (ENV_PORKBUN_API_KEY, self.porkbun_api_key.is_none()),
                (ENV_PORKBUN_SECRET_KEY, self.porkbun_secret_key.is_none()),
            ])),
        }
    }

    /// DNS updater settings, or `ConfigError` naming every missing variable.
    pub fn cloudflare_settings(&self) -> CoreResult<CloudflareSettings> {
        match (
            &self.cloudflare_api_token,
            &self.cloudflare_zone_id,
            &self.cloudflare_domain,
        ) {
            (Some(token), Some(zone), Some(domain)) => Ok(CloudflareSettings {
                api_token: token.clone(),
                zone_id: zone.clone(),
                base_domain: domain.trim_end_matches('.').to_string(),
            }),
            _ => Err(missing(&[
                (ENV_CLOUDFLARE_API_TOKEN, self.cloudflare_api_token.is_none()),
                (ENV_CLOUDFLARE_ZONE_ID, self.cloudflare_zone_id.is_none()),
                (ENV_CLOUDFLARE_DOMAIN, self.cloudflare_domain.is_none()),
            ])),
        }
    }

    /// Credential pair to build the registrar client with; empty when unset so the
    /// client can still be constructed (services refuse to call it in that case).
    pub(crate) fn registrar_credentials_or_empty(&self) -> RegistrarCredentials {
        RegistrarCredentials::new(
            self.porkbun_api_key.clone().unwrap_or_default(),
            self.porkbun_secret_key.clone().unwrap_or_default(),
        )
    }

    pub(crate) fn cloudflare_token_or_empty(&self) -> String {
        self.cloudflare_api_token.clone().unwrap_or_default()
    }
}

fn missing(vars: &[(&str, bool)]) -> CoreError {
    let names: Vec<&str> = vars
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();
    CoreError::ConfigError(format!(
        "Missing environment variable(s): {}",
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn registrar_credentials_present() {
        let cfg = config(&[(ENV_PORKBUN_API_KEY, "pk1_x"), (ENV_PORKBUN_SECRET_KEY, "sk1_y")]);
        let creds = cfg.registrar_credentials().unwrap();
        assert_eq!(creds.api_key, "pk1_x");
        assert_eq!(creds.secret_key, "sk1_y");
    }

    #[test]
    fn missing_secret_is_named() {
        let cfg = config(&[(ENV_PORKBUN_API_KEY, "pk1_x")]);
        let err = cfg.registrar_credentials().unwrap_err();
        assert!(
            matches!(&err, CoreError::ConfigError(m)
                if m.contains(ENV_PORKBUN_SECRET_KEY) && !m.contains(ENV_PORKBUN_API_KEY)),
            "{err}"
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cfg = config(&[(ENV_PORKBUN_API_KEY, "   "), (ENV_PORKBUN_SECRET_KEY, "")]);
        let err = cfg.registrar_credentials().unwrap_err();
        assert!(matches!(&err, CoreError::ConfigError(m)
            if m.contains(ENV_PORKBUN_API_KEY) && m.contains(ENV_PORKBUN_SECRET_KEY)));
    }

    #[test]
    fn cloudflare_lists_every_missing_variable() {
        let cfg = config(&[(ENV_CLOUDFLARE_ZONE_ID, "zone")]);
        let err = cfg.cloudflare_settings().unwrap_err();
        let CoreError::ConfigError(message) = err else {
            panic!("expected ConfigError");
        };
        assert!(message.contains(ENV_CLOUDFLARE_API_TOKEN));
        assert!(message.contains(ENV_CLOUDFLARE_DOMAIN));
        assert!(!message.contains(ENV_CLOUDFLARE_ZONE_ID));
    }

    #[test]
    fn cloudflare_domain_drops_trailing_dot() {
        let cfg = config(&[
            (ENV_CLOUDFLARE_API_TOKEN, "t"),
            (ENV_CLOUDFLARE_ZONE_ID, "z"),
            (ENV_CLOUDFLARE_DOMAIN, "example.com."),
        ]);
        assert_eq!(cfg.cloudflare_settings().unwrap().base_domain, "example.com");
    }

    #[test]
    fn api_url_overrides_are_optional() {
        let cfg = config(&[(ENV_PORKBUN_API_URL, "http://127.0.0.1:9000")]);
        assert_eq!(cfg.porkbun_api_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(cfg.cloudflare_api_url.is_none());
    }

    #[test]
    fn debug_masks_token() {
        let settings = CloudflareSettings {
            api_token: "cf_secret_token_value".into(),
            zone_id: "z".into(),
            base_domain: "example.com".into(),
        };
        assert!(!format!("{settings:?}").contains("secret_token_value"));
    }

    fn temp_env_file(tag: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "domain-toolkit-{tag}-{}.env",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn malformed_env_file_is_reported() {
        let path = temp_env_file(
            "malformed",
            "PORKBUN_API_URL=http://127.0.0.1:9001\nthis line is broken\nCLOUDFLARE_API_URL=http://127.0.0.1:9002\n",
        );

        let cfg = AppConfig::from_env_file(&path);
        std::fs::remove_file(&path).unwrap();

        let message = cfg.env_file_error().expect("parse failure should be kept");
        assert!(message.contains(".env"), "{message}");
        assert_eq!(cfg.porkbun_api_url.as_deref(), Some("http://127.0.0.1:9001"));
    }

    #[test]
    fn absent_env_file_is_not_an_error() {
        let path = std::env::temp_dir().join("domain-toolkit-does-not-exist.env");
        assert!(AppConfig::from_env_file(&path).env_file_error().is_none());
    }
}
