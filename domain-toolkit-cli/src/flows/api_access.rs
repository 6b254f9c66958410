//! `api-access-check`: which domains the registrar API may manage

use anyhow::Result;
use domain_toolkit_core::{
    AccessAuditService, ApiAccessReport, ApiAccessStatus, DisabledReason, DomainAccess,
};

use super::{numbered, print_api_access_guidance, report_error};
use crate::prompt::Prompter;

const RULE: &str = "========================================";

/// Audit result as seen by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditOutcome {
    Reported { enabled: usize, disabled: usize },
    Failed(String),
}

pub async fn run(service: &AccessAuditService, prompter: &mut dyn Prompter) -> Result<AuditOutcome> {
    prompter.say("Porkbun API Access Checker");
    prompter.say(RULE);

    match service.ping().await {
        Ok(ip) => prompter.say(&format!("API reachable, credentials accepted (your IP: {ip})")),
        Err(e) => {
            report_error(prompter, "API connectivity check failed", &e);
            return Ok(AuditOutcome::Failed(e.to_string()));
        }
    }

    prompter.say("Checking every domain in the account...");
    let report = match service.audit().await {
        Ok(report) => report,
        Err(e) => {
            report_error(prompter, "could not list domains", &e);
            return Ok(AuditOutcome::Failed(e.to_string()));
        }
    };
    prompter.say(&format!(
        "Found {} domains in your account",
        report.entries.len()
    ));
    prompter.say("");

    for entry in &report.entries {
        print_entry(prompter, entry);
    }
    print_summary(prompter, &report);

    Ok(AuditOutcome::Reported {
        enabled: report.enabled().count(),
        disabled: report.disabled().count(),
    })
}

fn print_entry(prompter: &mut dyn Prompter, entry: &DomainAccess) {
    match &entry.status {
        ApiAccessStatus::Enabled { nameservers } => {
            prompter.say(&format!("{}: API access ENABLED", entry.domain));
            if nameservers.is_empty() {
                prompter.say("   Using default Porkbun nameservers");
            } else {
                prompter.say(&format!("   Current nameservers ({}):", nameservers.len()));
                for line in numbered(nameservers) {
                    prompter.say(&format!("   {line}"));
                }
            }
        }
        ApiAccessStatus::Disabled { reason } => {
            prompter.say(&format!("{}: API access DISABLED", entry.domain));
            match reason {
                DisabledReason::NotOptedIn => {
                    prompter.say("   Reason: Domain not opted in to API access");
                }
                DisabledReason::Other(message) => prompter.say(&format!("   Reason: {message}")),
            }
        }
    }
    prompter.say("");
}

fn print_summary(prompter: &mut dyn Prompter, report: &ApiAccessReport) {
    prompter.say(RULE);
    prompter.say("SUMMARY");
    prompter.say(RULE);

    let enabled: Vec<&DomainAccess> = report.enabled().collect();
    prompter.say(&format!("Domains with API access enabled: {}", enabled.len()));
    for entry in &enabled {
        prompter.say(&format!("   - {}", entry.domain));
    }

    let disabled: Vec<&DomainAccess> = report.disabled().collect();
    prompter.say(&format!("Domains with API access disabled: {}", disabled.len()));
    for entry in &disabled {
        prompter.say(&format!("   - {}", entry.domain));
    }

    if !disabled.is_empty() {
        prompter.say("");
        print_api_access_guidance(prompter);
    }
}
