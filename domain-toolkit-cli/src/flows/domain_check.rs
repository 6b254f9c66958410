//! `domain-check`: availability lookup with optional registration

use anyhow::Result;
use domain_toolkit_core::DomainService;
use domain_toolkit_core::validation::validate_domain;
use domain_toolkit_provider::DomainAvailability;

use super::report_error;
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Registration went through.
    Registered,
    /// Available, but the purchase was declined.
    Declined,
    Unavailable,
    /// The entered name was not a domain.
    InvalidInput,
    /// Configuration or API failure, already shown to the user.
    Failed(String),
}

pub async fn run(service: &DomainService, prompter: &mut dyn Prompter) -> Result<CheckOutcome> {
    prompter.say("Porkbun Domain Tool");
    prompter.say("-------------------");

    if let Err(e) = service.ensure_configured() {
        report_error(prompter, "cannot start", &e);
        return Ok(CheckOutcome::Failed(e.to_string()));
    }

    let answer = prompter
        .text("Enter the domain name you want to check (e.g., 'example.com'):")?
        .unwrap_or_default();
    let Ok(domain) = validate_domain(&answer) else {
        prompter.say("Invalid domain name format.");
        return Ok(CheckOutcome::InvalidInput);
    };

    prompter.say(&format!("Checking availability for {domain}..."));
    let availability = match service.check_availability(&domain).await {
        Ok(availability) => availability,
        Err(e) => {
            report_error(prompter, "could not check availability", &e);
            return Ok(CheckOutcome::Failed(e.to_string()));
        }
    };

    if !availability.available {
        prompter.say(&format!(
            "Sorry, '{domain}' is not available. Reason: Domain is not available"
        ));
        return Ok(CheckOutcome::Unavailable);
    }

    let price = price_label(&availability);
    prompter.say(&format!("Good news! '{domain}' is available for registration."));
    prompter.say(&format!("Registration price: {price} for the first year."));
    if availability.premium {
        prompter.say("This is a premium domain.");
    }
    if let Some(regular) = availability
        .regular_price
        .as_deref()
        .filter(|regular| availability.price.as_deref() != Some(*regular))
    {
        prompter.say(&format!(
            "Regular price: ${regular} {}",
            DomainAvailability::CURRENCY
        ));
    }

    if !prompter.confirm(
        &format!("Do you want to register '{domain}' now for {price}?"),
        false,
    )? {
        prompter.say("Registration cancelled.");
        return Ok(CheckOutcome::Declined);
    }

    prompter.say(&format!("Registering '{domain}'..."));
    match service.register(&domain).await {
        Ok(receipt) => {
            prompter.say("Registration successful!");
            prompter.say(&serde_json::to_string_pretty(&receipt)?);
            Ok(CheckOutcome::Registered)
        }
        Err(e) => {
            report_error(prompter, "registration failed", &e);
            Ok(CheckOutcome::Failed(e.to_string()))
        }
    }
}

fn price_label(availability: &DomainAvailability) -> String {
    match availability.price.as_deref() {
        Some(price) => format!("${price} {}", DomainAvailability::CURRENCY),
        None => "an unlisted price".to_string(),
    }
}
