//! Nameserver reconciliation
//!
//! Pure planning step between "what the registrar has" and "what the user wants".
//! No I/O: the caller fetches `current` and submits `desired` if the plan says so.

use serde::Serialize;

use crate::error::CoreResult;
use crate::validation::{same_host, validate_domain, validate_nameservers};

/// What applying a plan would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanAction {
    /// Submit `desired` to the registrar.
    Replace,
    /// `desired` already matches `current`.
    NoChange,
}

/// A validated nameserver change for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverPlan {
    pub domain: String,
    pub current: Vec<String>,
    /// Trimmed, in the order given.
    pub desired: Vec<String>,
    pub action: PlanAction,
}

/// Plan replacing `current` with `desired` for `domain`.
///
/// Order matters: the same hosts in a different order is a `Replace`.
pub fn plan_nameserver_change(
    domain: &str,
    current: &[String],
    desired: &[String],
) -> CoreResult<NameserverPlan> {
    let domain = validate_domain(domain)?;
    let desired = validate_nameservers(desired)?;

    let action = if nameservers_match(current, &desired) {
        PlanAction::NoChange
    } else {
        PlanAction::Replace
    };

    Ok(NameserverPlan {
        domain,
        current: current.to_vec(),
        desired,
        action,
    })
}

/// Same length and the same host at every position.
pub fn nameservers_match(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_host(x, y))
}
