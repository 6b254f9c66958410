//! Interactive front-end for domain-toolkit.
//!
//! Each binary under `src/bin/` builds an [`AppConfig`](domain_toolkit_core::AppConfig),
//! a terminal [`Prompter`](prompt::Prompter) and runs one flow from [`flows`].
//! Flows talk to the user only through the prompter, so they run unchanged against a
//! scripted prompter in tests.

pub mod flows;
pub mod logging;
pub mod prompt;
