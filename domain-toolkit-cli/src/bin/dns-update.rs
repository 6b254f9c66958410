//! Create or update a Cloudflare DNS record.

use std::sync::Arc;

use domain_toolkit_cli::flows::dns_update;
use domain_toolkit_cli::{flows, logging};
use domain_toolkit_cli::prompt::TerminalPrompter;
use domain_toolkit_core::{AppConfig, DnsRecordService, ServiceContext};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    logging::init();

    let ctx = Arc::new(ServiceContext::from_config(config)?);
    let service = DnsRecordService::new(Arc::clone(&ctx));
    let mut prompter = TerminalPrompter::new()?;
    flows::report_env_file(&mut prompter, &ctx.config);

    let outcome = dns_update::run(&service, &mut prompter).await?;
    tracing::debug!("dns-update finished: {outcome:?}");
    Ok(())
}
