//! `dns-update`: create or overwrite one Cloudflare DNS record

use anyhow::Result;
use domain_toolkit_core::{DnsRecordService, UpsertAction};
use domain_toolkit_provider::DnsRecordType;

use super::report_error;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied(UpsertAction),
    /// An empty answer ended the flow.
    Cancelled,
    Failed(String),
}

pub async fn run(service: &DnsRecordService, prompter: &mut dyn Prompter) -> Result<UpdateOutcome> {
    prompter.say("Cloudflare DNS Updater");
    prompter.say("----------------------");

    let base_domain = match service.base_domain() {
        Ok(base_domain) => base_domain,
        Err(e) => {
            report_error(prompter, "cannot start", &e);
            return Ok(UpdateOutcome::Failed(e.to_string()));
        }
    };
    prompter.say(&format!("Zone: {base_domain}"));

    let name = prompter
        .text("Enter the subdomain (e.g., 'www', or '@' for the root domain):")?
        .unwrap_or_default();
    if name.is_empty() {
        prompter.say("Operation cancelled: Subdomain cannot be empty.");
        return Ok(UpdateOutcome::Cancelled);
    }

    let types: Vec<String> = DnsRecordType::ALL
        .iter()
        .map(|t| t.as_str().to_string())
        .collect();
    let Some(index) = prompter.select("Select the record type:", &types)? else {
        prompter.say("Operation cancelled: no record type selected.");
        return Ok(UpdateOutcome::Cancelled);
    };
    let record_type = DnsRecordType::ALL[index];

    let content = prompter
        .text(&format!("Enter the content for the {record_type} record:"))?
        .unwrap_or_default();
    if content.is_empty() {
        prompter.say("Operation cancelled: Content cannot be empty.");
        return Ok(UpdateOutcome::Cancelled);
    }

    let proxied = prompter.confirm("Should the record be proxied by Cloudflare?", true)?;

    prompter.say("Updating DNS record...");
    match service.upsert(&name, record_type, &content, proxied).await {
        Ok(outcome) => {
            let verb = match outcome.action {
                UpsertAction::Created => "Created",
                UpsertAction::Updated => "Updated",
            };
            let record = &outcome.record;
            prompter.say(&format!(
                "{verb} {} record {} -> {} (proxied: {})",
                record.record_type,
                record.name,
                record.content,
                record.proxied.unwrap_or(false)
            ));
            prompter.say(&format!("Record id: {}", record.id));
            Ok(UpdateOutcome::Applied(outcome.action))
        }
        Err(e) => {
            report_error(prompter, "could not update the DNS record", &e);
            Ok(UpdateOutcome::Failed(e.to_string()))
        }
    }
}
