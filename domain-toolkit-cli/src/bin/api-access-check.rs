//! Report which Porkbun domains have API access enabled.

use std::sync::Arc;

use domain_toolkit_cli::flows::api_access;
use domain_toolkit_cli::{flows, logging};
use domain_toolkit_cli::prompt::TerminalPrompter;
use domain_toolkit_core::{AccessAuditService, AppConfig, ServiceContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init();

    let ctx = Arc::new(ServiceContext::from_config(config)?);
    let service = AccessAuditService::new(Arc::clone(&ctx));
    // Non-interactive, but output still goes through the prompter.
    let mut prompter = TerminalPrompter::new()?;
    flows::report_env_file(&mut prompter, &ctx.config);

    let outcome = api_access::run(&service, &mut prompter).await?;
    tracing::debug!("api-access-check finished: {outcome:?}");
    Ok(())
}
