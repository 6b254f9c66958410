//! Log output for the binaries
//!
//! Library crates log through the `log` facade; the subscriber installed here picks
//! those records up. Output goes to stderr so it never mixes with prompts.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "DOMAIN_TOOLKIT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Call after `.env` has been loaded.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
