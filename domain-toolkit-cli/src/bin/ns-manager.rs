//! Interactive nameserver manager for Porkbun domains.

use std::sync::Arc;

use domain_toolkit_cli::flows::nameservers;
use domain_toolkit_cli::{flows, logging};
use domain_toolkit_cli::prompt::TerminalPrompter;
use domain_toolkit_core::{AppConfig, NameserverService, ServiceContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init();

    let ctx = Arc::new(ServiceContext::from_config(config)?);
    let service = NameserverService::new(Arc::clone(&ctx));
    let mut prompter = TerminalPrompter::new()?;
    flows::report_env_file(&mut prompter, &ctx.config);

    let outcome = nameservers::run(&service, &mut prompter).await?;
    tracing::debug!(
        "ns-manager finished at {:?}: {:?}",
        outcome.last_stage(),
        outcome.reason
    );
    Ok(())
}
