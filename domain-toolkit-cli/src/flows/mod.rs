//! Interactive flows, one per binary
//!
//! A flow prints through the [`Prompter`](crate::prompt::Prompter), handles every
//! `CoreError` where it occurs and returns normally. Only prompt backend failures
//! propagate as `Err`.

pub mod api_access;
pub mod dns_update;
pub mod domain_check;
pub mod nameservers;

use chrono::Utc;
use domain_toolkit_core::{AppConfig, CoreError};
use domain_toolkit_provider::RegistrarDomain;
use domain_toolkit_provider::datetime::days_until;

use crate::prompt::Prompter;

/// Steps for turning on API access for a domain at the registrar.
pub const API_ACCESS_STEPS: [&str; 5] = [
    "1. Go to https://porkbun.com/account/domainsSpeedy",
    "2. Find the domain and click 'Details'",
    "3. Open the 'API Access' section",
    "4. Enable 'API Access' for the domain",
    "5. Wait a few minutes for the change to take effect, then run this tool again",
];

pub const PROPAGATION_NOTE: &str =
    "Note: nameserver changes can take up to 48 hours to propagate globally.";

/// Print the enable-API-access instructions.
pub fn print_api_access_guidance(prompter: &mut dyn Prompter) {
    prompter.say("To enable API access:");
    for step in API_ACCESS_STEPS {
        prompter.say(&format!("  {step}"));
    }
    prompter.say("API access has to be enabled for each domain individually.");
}

/// Human-readable explanation of a failure.
pub fn describe_error(err: &CoreError) -> String {
    match err {
        CoreError::ConfigError(message) => {
            format!("{message}. Set them in the environment or in a .env file.")
        }
        CoreError::ValidationError(message) => message.clone(),
        CoreError::AuthError(message) => {
            format!("The API rejected the credentials ({message}). Check your API keys.")
        }
        CoreError::TransportError(message) => format!("Could not reach the API: {message}"),
        CoreError::ApiError {
            provider, message, ..
        } => format!("{provider} returned an error: {message}"),
    }
}

/// Print an error line, plus guidance where there is some.
pub fn report_error(prompter: &mut dyn Prompter, context: &str, err: &CoreError) {
    prompter.say(&format!("Error: {context}: {}", describe_error(err)));
    if err.is_api_access_disabled() {
        print_api_access_guidance(prompter);
    }
}

/// Surface a `.env` problem from startup, before any prompt.
pub fn report_env_file(prompter: &mut dyn Prompter, config: &AppConfig) {
    if let Some(problem) = config.env_file_error() {
        prompter.say(&format!("Warning: {problem}"));
    }
}

/// One-line summary of a domain for menus and listings.
pub fn format_domain(domain: &RegistrarDomain) -> String {
    let status = domain.status.as_deref().unwrap_or("Unknown");
    let expiry = domain.expiry.as_deref().unwrap_or("Unknown");
    match domain.expires_at {
        Some(expires_at) => {
            let days = days_until(expires_at, Utc::now());
            let when = if days < 0 {
                format!("expired {} days ago", -days)
            } else {
                format!("in {days} days")
            };
            format!("{} (Status: {status}, Expires: {expiry}, {when})", domain.name)
        }
        None => format!("{} (Status: {status}, Expires: {expiry})", domain.name),
    }
}

/// Numbered list lines.
pub fn numbered(items: &[String]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {item}", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_toolkit_core::ApiErrorKind;

    use crate::prompt::ScriptedPrompter;

    fn domain(expiry: Option<&str>) -> RegistrarDomain {
        RegistrarDomain {
            name: "example.com".to_string(),
            status: Some("ACTIVE".to_string()),
            expiry: expiry.map(str::to_string),
            expires_at: expiry.and_then(domain_toolkit_provider::datetime::parse_registrar_datetime),
            tld: None,
            auto_renew: None,
            security_lock: None,
            whois_privacy: None,
        }
    }

    #[test]
    fn domain_line_with_unparsed_expiry() {
        assert_eq!(
            format_domain(&domain(None)),
            "example.com (Status: ACTIVE, Expires: Unknown)"
        );
    }

    #[test]
    fn domain_line_with_past_expiry() {
        let line = format_domain(&domain(Some("2001-01-01 00:00:00")));
        assert!(line.contains("expired"), "{line}");
    }

    #[test]
    fn numbered_lines_start_at_one() {
        let lines = numbered(&["a.example.net".to_string(), "b.example.net".to_string()]);
        assert_eq!(lines, ["  1. a.example.net", "  2. b.example.net"]);
    }

    #[test]
    fn malformed_env_file_warns_before_prompting() {
        let path = std::env::temp_dir().join(format!(
            "domain-toolkit-cli-{}.env",
            std::process::id()
        ));
        std::fs::write(&path, "PORKBUN_API_URL=http://127.0.0.1:9003\nnot a pair\n").unwrap();
        let config = AppConfig::from_env_file(&path);
        std::fs::remove_file(&path).unwrap();

        let mut prompter = ScriptedPrompter::new(&[]);
        report_env_file(&mut prompter, &config);

        assert!(prompter.output().starts_with("Warning: .env file could not be fully loaded"));
    }

    #[test]
    fn clean_config_prints_nothing() {
        let mut prompter = ScriptedPrompter::new(&[]);
        report_env_file(&mut prompter, &AppConfig::default());
        assert!(prompter.transcript.is_empty());
    }

    #[test]
    fn api_error_description_names_provider() {
        let err = CoreError::ApiError {
            provider: "porkbun".to_string(),
            kind: ApiErrorKind::Rejected,
            message: "Invalid nameserver".to_string(),
        };
        assert_eq!(describe_error(&err), "porkbun returned an error: Invalid nameserver");
    }
}
