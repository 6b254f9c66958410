//! Porkbun error mapping
//!
//! Porkbun reports failures as `{"status":"ERROR","message":"..."}` without stable
//! error codes, so classification is by message text. This is best effort: unknown
//! wording falls through to `ProviderError::Unknown` with the message preserved.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::PorkbunProvider;

impl ProviderErrorMapper for PorkbunProvider {
    fn provider_name(&self) -> &'static str {
        "porkbun"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let message = raw.message.to_lowercase();
        let domain = || {
            context
                .domain
                .clone()
                .unwrap_or_else(|| "<unknown>".to_string())
        };

        // "Domain is not opted in to API access."
        if message.contains("not opted in") {
            return ProviderError::ApiAccessDisabled {
                provider: self.provider_name().to_string(),
                domain: domain(),
                raw_message: Some(raw.message),
            };
        }

        // "Invalid API key. (002)" / HTTP 401, 403
        if (message.contains("api key") && message.contains("invalid"))
            || message.contains("invalid secret")
            || matches!(raw.code.as_deref(), Some("401" | "403"))
        {
            return ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            };
        }

        if message.contains("nameserver") || message.contains("name server") {
            return ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ns".to_string(),
                detail: raw.message,
            };
        }

        // "Invalid domain." / "Domain not found" / HTTP 404
        if message.contains("invalid domain")
            || message.contains("domain not found")
            || raw.code.as_deref() == Some("404")
        {
            return ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: domain(),
                raw_message: Some(raw.message),
            };
        }

        self.unknown_error(raw)
    }
}
