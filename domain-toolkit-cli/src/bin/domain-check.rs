//! Check whether a domain can be registered and optionally buy it.

use std::sync::Arc;

use domain_toolkit_cli::flows::domain_check;
use domain_toolkit_cli::{flows, logging};
use domain_toolkit_cli::prompt::TerminalPrompter;
use domain_toolkit_core::{AppConfig, DomainService, ServiceContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init();

    let ctx = Arc::new(ServiceContext::from_config(config)?);
    let service = DomainService::new(Arc::clone(&ctx));
    let mut prompter = TerminalPrompter::new()?;
    flows::report_env_file(&mut prompter, &ctx.config);

    let outcome = domain_check::run(&service, &mut prompter).await?;
    tracing::debug!("domain-check finished: {outcome:?}");
    Ok(())
}
