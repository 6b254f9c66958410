//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_toolkit_provider::ProviderError;

/// Classification of a remote API failure that is not a transport or auth problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiErrorKind {
    /// The domain is not opted in to API access at the registrar.
    ApiAccessDisabled,
    /// Domain or zone does not exist (or is not in this account).
    NotFound,
    /// The remote side rejected the request (bad parameter, status `ERROR`).
    Rejected,
    /// The response could not be understood.
    Unexpected,
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Missing or blank configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input rejected before any network call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Credentials rejected by the remote API
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// The request could not complete (connection, timeout, gateway)
    #[error("{0}")]
    TransportError(String),

    /// The remote API answered with a failure
    #[error("API error: {provider} - {message}")]
    ApiError {
        provider: String,
        kind: ApiErrorKind,
        message: String,
    },
}

impl CoreError {
    /// Whether it is expected behavior (user input, access not enabled, resource does not exist),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ConfigError(_) | Self::ValidationError(_) | Self::AuthError(_) => true,
            Self::ApiError { kind, .. } => !matches!(kind, ApiErrorKind::Unexpected),
            Self::TransportError(_) => false,
        }
    }

    /// The domain has not been opted in to API access.
    #[must_use]
    pub fn is_api_access_disabled(&self) -> bool {
        matches!(
            self,
            Self::ApiError {
                kind: ApiErrorKind::ApiAccessDisabled,
                ..
            }
        )
    }
}

impl From<ProviderError> for CoreError {
    fn from(err: ProviderError) -> Self {
        let provider = err.provider().to_string();
        let api_error = |kind: ApiErrorKind, message: String| Self::ApiError {
            provider: provider.clone(),
            kind,
            message,
        };

        match err {
            ProviderError::NetworkError { .. } | ProviderError::Timeout { .. } => {
                Self::TransportError(err.to_string())
            }
            ProviderError::InvalidCredentials { .. } => Self::AuthError(err.to_string()),
            ProviderError::ApiAccessDisabled {
                ref domain,
                ref raw_message,
                ..
            } => api_error(
                ApiErrorKind::ApiAccessDisabled,
                raw_message
                    .clone()
                    .unwrap_or_else(|| format!("Domain '{domain}' is not opted in to API access")),
            ),
            ProviderError::DomainNotFound {
                ref domain,
                ref raw_message,
                ..
            } => api_error(
                ApiErrorKind::NotFound,
                raw_message
                    .clone()
                    .unwrap_or_else(|| format!("Domain not found: {domain}")),
            ),
            ProviderError::InvalidParameter { param, detail, .. } => {
                api_error(ApiErrorKind::Rejected, format!("{param}: {detail}"))
            }
            ProviderError::Unknown { raw_message, .. } => {
                api_error(ApiErrorKind::Rejected, raw_message)
            }
            ProviderError::ParseError { detail, .. } => {
                api_error(ApiErrorKind::Unexpected, format!("Unreadable response: {detail}"))
            }
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_timeout_are_transport_errors() {
        let err: CoreError = ProviderError::Timeout {
            provider: "porkbun".into(),
            detail: "operation timed out".into(),
        }
        .into();
        assert!(matches!(err, CoreError::TransportError(_)));
        assert!(!err.is_expected());
    }

    #[test]
    fn invalid_credentials_is_auth_error() {
        let err: CoreError = ProviderError::InvalidCredentials {
            provider: "porkbun".into(),
            raw_message: Some("Invalid API key. (002)".into()),
        }
        .into();
        assert!(matches!(err, CoreError::AuthError(ref m) if m.contains("Invalid API key")));
    }

    #[test]
    fn not_opted_in_keeps_kind_and_message() {
        let err: CoreError = ProviderError::ApiAccessDisabled {
            provider: "porkbun".into(),
            domain: "example.com".into(),
            raw_message: Some("Domain is not opted in to API access.".into()),
        }
        .into();
        assert!(err.is_api_access_disabled());
        assert!(err.is_expected());
        assert!(matches!(
            err,
            CoreError::ApiError { ref provider, ref message, .. }
                if provider == "porkbun" && message == "Domain is not opted in to API access."
        ));
    }

    #[test]
    fn unknown_remote_failure_is_rejected() {
        let err: CoreError = ProviderError::Unknown {
            provider: "porkbun".into(),
            raw_code: Some("400".into()),
            raw_message: "Something went sideways.".into(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::ApiError { kind: ApiErrorKind::Rejected, ref message, .. }
                if message == "Something went sideways."
        ));
    }

    #[test]
    fn parse_error_is_unexpected() {
        let err: CoreError = ProviderError::ParseError {
            provider: "cloudflare".into(),
            detail: "expected value".into(),
        }
        .into();
        assert!(matches!(
            err,
            CoreError::ApiError { kind: ApiErrorKind::Unexpected, .. }
        ));
        assert!(!err.is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::ValidationError("bad".into())).unwrap();
        assert_eq!(json["code"], "ValidationError");
        assert_eq!(json["details"], "bad");
    }
}
