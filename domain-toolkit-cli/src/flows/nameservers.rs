//! `ns-manager`: inspect and replace a domain's nameservers
//!
//! list domains → select → fetch current set → confirm change → collect new set →
//! confirm → submit. Declining or cancelling any prompt ends the flow normally.

use anyhow::Result;
use domain_toolkit_core::validation::{MAX_NAMESERVERS, MIN_NAMESERVERS, is_valid_nameserver};
use domain_toolkit_core::{CoreError, NameserverService, PlanAction};

use super::{PROPAGATION_NOTE, format_domain, numbered, print_api_access_guidance, report_error};
use crate::prompt::Prompter;

/// Whether the current nameservers could be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Ok,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Ok,
    Failed,
}

/// Progress through one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Init,
    DomainsListed,
    DomainSelected,
    NameserversFetched(FetchStatus),
    NewSetCollected,
    Confirmed,
    Submitted(SubmitStatus),
    Done,
}

/// Why the flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndReason {
    /// The new nameservers were accepted.
    Applied,
    /// The requested set equals the current one.
    NoChange,
    /// The account has no domains.
    NoDomains,
    /// A prompt was declined, left empty or closed.
    UserAborted,
    /// An API call failed; the message was shown to the user.
    Failed(String),
}

/// Terminal state of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    /// Every stage passed, in order, starting at `Init` and ending at `Done`.
    pub stages: Vec<FlowStage>,
    pub reason: EndReason,
}

impl FlowOutcome {
    /// Last stage reached before `Done`.
    pub fn last_stage(&self) -> FlowStage {
        self.stages
            .iter()
            .rev()
            .copied()
            .find(|stage| *stage != FlowStage::Done)
            .unwrap_or(FlowStage::Init)
    }
}

/// Stages recorded while the flow runs.
struct Trail(Vec<FlowStage>);

impl Trail {
    fn start() -> Self {
        Self(vec![FlowStage::Init])
    }

    fn advance(&mut self, stage: FlowStage) {
        tracing::debug!("ns-manager: {stage:?}");
        self.0.push(stage);
    }

    fn finish(mut self, reason: EndReason) -> FlowOutcome {
        self.0.push(FlowStage::Done);
        FlowOutcome {
            stages: self.0,
            reason,
        }
    }
}

/// Outcome of collecting a new nameserver set.
enum Collected {
    Set(Vec<String>),
    Cancelled,
}

pub async fn run(service: &NameserverService, prompter: &mut dyn Prompter) -> Result<FlowOutcome> {
    prompter.say("Porkbun Nameserver Manager");
    prompter.say("==========================");
    let mut trail = Trail::start();

    prompter.say("Retrieving your domains...");
    let domains = match service.list_domains().await {
        Ok(domains) => domains,
        Err(e) => {
            report_error(prompter, "could not list domains", &e);
            return Ok(trail.finish(EndReason::Failed(e.to_string())));
        }
    };
    trail.advance(FlowStage::DomainsListed);
    if domains.is_empty() {
        prompter.say("No domains found in your account.");
        return Ok(trail.finish(EndReason::NoDomains));
    }
    prompter.say(&format!("Found {} domain(s) in your account.", domains.len()));

    let labels: Vec<String> = domains.iter().map(format_domain).collect();
    let Some(index) = prompter.select("Select a domain to manage nameservers:", &labels)? else {
        prompter.say("No domain selected. Exiting.");
        return Ok(trail.finish(EndReason::UserAborted));
    };
    let domain = domains[index].name.clone();
    trail.advance(FlowStage::DomainSelected);
    prompter.say(&format!("Selected domain: {domain}"));

    prompter.say("Retrieving current nameservers...");
    let (current, fetch_status) = match service.get_nameservers(&domain).await {
        Ok(current) => (current, FetchStatus::Ok),
        Err(e) => {
            report_fetch_failure(prompter, &domain, &e);
            (Vec::new(), FetchStatus::Unavailable)
        }
    };
    trail.advance(FlowStage::NameserversFetched(fetch_status));

    if fetch_status == FetchStatus::Ok {
        prompter.say(&format!("Current nameservers for {domain}:"));
        if current.is_empty() {
            prompter.say("  None listed (the registrar's default nameservers are in use).");
        } else {
            for line in numbered(&current) {
                prompter.say(&line);
            }
        }
    }

    if !prompter.confirm(
        &format!("Do you want to change the nameservers for {domain}?"),
        false,
    )? {
        prompter.say("No changes made. Exiting.");
        return Ok(trail.finish(EndReason::UserAborted));
    }

    let plan = loop {
        let desired = match collect_nameservers(prompter, &domain)? {
            Collected::Set(desired) => desired,
            Collected::Cancelled => {
                prompter.say("No nameservers entered. Exiting.");
                return Ok(trail.finish(EndReason::UserAborted));
            }
        };
        match service.plan(&domain, &current, &desired) {
            Ok(plan) => break plan,
            Err(e) => prompter.say(&format!("{}. Let's start over.", super::describe_error(&e))),
        }
    };
    trail.advance(FlowStage::NewSetCollected);

    if plan.action == PlanAction::NoChange {
        prompter.say("The new nameservers are identical to the current ones. Nothing to do.");
        return Ok(trail.finish(EndReason::NoChange));
    }

    prompter.say("New nameservers to set:");
    for line in numbered(&plan.desired) {
        prompter.say(&line);
    }

    if !prompter.confirm(
        &format!("Confirm updating nameservers for {domain}?"),
        false,
    )? {
        prompter.say("Update cancelled.");
        return Ok(trail.finish(EndReason::UserAborted));
    }
    trail.advance(FlowStage::Confirmed);

    prompter.say(&format!("Updating nameservers for {domain}..."));
    match service.set_nameservers(&domain, &plan.desired).await {
        Ok(_) => {
            trail.advance(FlowStage::Submitted(SubmitStatus::Ok));
            prompter.say(&format!("Success! Nameservers updated for {domain}."));
            prompter.say(PROPAGATION_NOTE);
            Ok(trail.finish(EndReason::Applied))
        }
        Err(e) => {
            trail.advance(FlowStage::Submitted(SubmitStatus::Failed));
            report_error(prompter, &format!("could not update nameservers for {domain}"), &e);
            Ok(trail.finish(EndReason::Failed(e.to_string())))
        }
    }
}

/// A failed fetch never ends the flow; the user may still set new nameservers.
fn report_fetch_failure(prompter: &mut dyn Prompter, domain: &str, err: &CoreError) {
    if err.is_api_access_disabled() {
        prompter.say("API access is not enabled.");
        prompter.say(&format!(
            "The domain '{domain}' is not opted in to API access."
        ));
        print_api_access_guidance(prompter);
    } else {
        prompter.say(&format!(
            "Warning: could not retrieve current nameservers: {}",
            super::describe_error(err)
        ));
    }
    prompter.say("Current nameservers are unknown, but you can still set new ones.");
}

/// Ask for up to four nameservers.
///
/// An empty first entry cancels. Fewer than two entries, or an entry without a dot,
/// restarts from the first entry. An empty entry after the second finishes.
fn collect_nameservers(prompter: &mut dyn Prompter, domain: &str) -> Result<Collected> {
    prompter.say(&format!(
        "Enter new nameservers for {domain} ({MIN_NAMESERVERS}-{MAX_NAMESERVERS}). \
         Press Enter on an optional entry to finish."
    ));

    'restart: loop {
        let mut entries: Vec<String> = Vec::with_capacity(MAX_NAMESERVERS);

        while entries.len() < MAX_NAMESERVERS {
            let position = entries.len() + 1;
            let label = if position <= MIN_NAMESERVERS {
                "required"
            } else {
                "optional"
            };
            let Some(entry) = prompter.text(&format!("Nameserver {position} ({label}):"))? else {
                return Ok(Collected::Cancelled);
            };

            if entry.is_empty() {
                if entries.is_empty() {
                    return Ok(Collected::Cancelled);
                }
                if entries.len() < MIN_NAMESERVERS {
                    prompter.say(&format!(
                        "At least {MIN_NAMESERVERS} nameservers are required!"
                    ));
                    continue 'restart;
                }
                break;
            }

            if !is_valid_nameserver(&entry) {
                prompter.say(&format!("Invalid nameserver format: {entry}"));
                continue 'restart;
            }
            entries.push(entry);
        }

        return Ok(Collected::Set(entries));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain_toolkit_core::test_utils::{
        DEFAULT_NAMESERVERS, MockRegistrar, context_with_registrar, context_without_credentials,
    };

    use super::*;
    use crate::prompt::ScriptedPrompter;

    fn service(registrar: &Arc<MockRegistrar>) -> NameserverService {
        NameserverService::new(context_with_registrar(registrar.clone()))
    }

    #[tokio::test]
    async fn happy_path_submits_new_set() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com", "beta.net"]));
        let mut prompter = ScriptedPrompter::new(&[
            "2",
            "y",
            "ns1.example.net",
            "ns2.example.net",
            "",
            "y",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::Applied);
        assert_eq!(outcome.last_stage(), FlowStage::Submitted(SubmitStatus::Ok));
        assert_eq!(
            outcome.stages,
            [
                FlowStage::Init,
                FlowStage::DomainsListed,
                FlowStage::DomainSelected,
                FlowStage::NameserversFetched(FetchStatus::Ok),
                FlowStage::NewSetCollected,
                FlowStage::Confirmed,
                FlowStage::Submitted(SubmitStatus::Ok),
                FlowStage::Done,
            ]
        );
        assert_eq!(
            registrar.updates().await,
            [(
                "beta.net".to_string(),
                vec!["ns1.example.net".to_string(), "ns2.example.net".to_string()]
            )]
        );
        let output = prompter.output();
        assert!(output.contains(DEFAULT_NAMESERVERS[0]));
        assert!(output.contains(PROPAGATION_NOTE));
    }

    #[tokio::test]
    async fn four_entries_finish_without_blank() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[
            "1", "y", "a.ns.net", "b.ns.net", "c.ns.net", "d.ns.net", "y",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::Applied);
        assert_eq!(registrar.updates().await[0].1.len(), 4);
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn not_opted_in_still_offers_update() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["locked.com"]));
        registrar.disable_api_access("locked.com").await;
        let mut prompter = ScriptedPrompter::new(&["1", "n"]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(
            outcome.last_stage(),
            FlowStage::NameserversFetched(FetchStatus::Unavailable)
        );
        assert_eq!(outcome.reason, EndReason::UserAborted);
        let output = prompter.output();
        assert!(output.contains("not opted in to API access"));
        assert!(output.contains("domainsSpeedy"));
        assert!(output.contains("Do you want to change the nameservers for locked.com?"));
    }

    #[tokio::test]
    async fn other_fetch_failure_warns_and_continues() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["flaky.com"]));
        registrar.fail_domain_with_network_error("flaky.com").await;
        let mut prompter = ScriptedPrompter::new(&["1", "n"]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(
            outcome.last_stage(),
            FlowStage::NameserversFetched(FetchStatus::Unavailable)
        );
        assert!(prompter.output().contains("Warning: could not retrieve current nameservers"));
    }

    #[tokio::test]
    async fn too_few_entries_restart_from_first() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[
            "1",
            "y",
            "ns1.example.net",
            "",
            "ns1.example.net",
            "ns2.example.net",
            "",
            "y",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::Applied);
        assert!(prompter.output().contains("At least 2 nameservers are required!"));
    }

    #[tokio::test]
    async fn dotless_entry_restarts_from_first() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[
            "1",
            "y",
            "ns1.example.net",
            "localhost",
            "ns1.example.net",
            "ns2.example.net",
            "",
            "y",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::Applied);
        assert!(prompter.output().contains("Invalid nameserver format: localhost"));
        assert_eq!(registrar.updates().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_entries_restart_collection() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[
            "1",
            "y",
            "ns1.example.net",
            "NS1.example.net",
            "",
            "ns1.example.net",
            "ns2.example.net",
            "",
            "y",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::Applied);
        assert!(prompter.output().contains("Duplicate nameserver"));
    }

    #[tokio::test]
    async fn identical_set_is_not_submitted() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[
            "1",
            "y",
            DEFAULT_NAMESERVERS[0],
            DEFAULT_NAMESERVERS[1],
            "",
        ]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::NoChange);
        assert_eq!(outcome.last_stage(), FlowStage::NewSetCollected);
        assert!(registrar.updates().await.is_empty());
    }

    #[tokio::test]
    async fn declining_final_confirmation_aborts() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter =
            ScriptedPrompter::new(&["1", "y", "ns1.example.net", "ns2.example.net", "", "n"]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::UserAborted);
        assert_eq!(outcome.last_stage(), FlowStage::NewSetCollected);
        assert!(registrar.updates().await.is_empty());
        assert!(prompter.output().contains("Update cancelled."));
    }

    #[tokio::test]
    async fn empty_selection_aborts() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&[""]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::UserAborted);
        assert_eq!(outcome.last_stage(), FlowStage::DomainsListed);
        assert_eq!(registrar.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_first_nameserver_cancels() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let mut prompter = ScriptedPrompter::new(&["1", "y", ""]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::UserAborted);
        assert_eq!(
            outcome.last_stage(),
            FlowStage::NameserversFetched(FetchStatus::Ok)
        );
    }

    #[tokio::test]
    async fn rejected_update_is_reported() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        registrar.reject_updates("Invalid nameserver configuration.").await;
        let mut prompter =
            ScriptedPrompter::new(&["1", "y", "ns1.example.net", "ns2.example.net", "", "y"]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.last_stage(), FlowStage::Submitted(SubmitStatus::Failed));
        assert_eq!(
            outcome.stages[outcome.stages.len() - 3..],
            [
                FlowStage::Confirmed,
                FlowStage::Submitted(SubmitStatus::Failed),
                FlowStage::Done,
            ]
        );
        assert!(matches!(outcome.reason, EndReason::Failed(_)));
        assert!(prompter.output().contains("Invalid nameserver configuration."));
    }

    #[tokio::test]
    async fn empty_account_ends_early() {
        let registrar = Arc::new(MockRegistrar::with_domains(&[]));
        let mut prompter = ScriptedPrompter::new(&[]);

        let outcome = run(&service(&registrar), &mut prompter).await.unwrap();

        assert_eq!(outcome.reason, EndReason::NoDomains);
        assert!(prompter.output().contains("No domains found"));
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_call() {
        let registrar = Arc::new(MockRegistrar::with_domains(&["alpha.com"]));
        let service = NameserverService::new(context_without_credentials(registrar.clone()));
        let mut prompter = ScriptedPrompter::new(&[]);

        let outcome = run(&service, &mut prompter).await.unwrap();

        assert_eq!(outcome.last_stage(), FlowStage::Init);
        assert!(matches!(outcome.reason, EndReason::Failed(ref m) if m.contains("PORKBUN_API_KEY")));
        assert_eq!(registrar.call_count(), 0);
    }
}
