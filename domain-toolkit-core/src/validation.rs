//! Input validation
//!
//! Syntactic checks only; nothing here resolves names.

use domain_toolkit_provider::DnsRecordType;

use crate::error::{CoreError, CoreResult};

/// Fewest nameservers the registrar accepts.
pub const MIN_NAMESERVERS: usize = 2;
/// Most nameservers collected per update.
pub const MAX_NAMESERVERS: usize = 4;

/// Validate a domain identifier and return it trimmed.
pub fn validate_domain(domain: &str) -> CoreResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(CoreError::ValidationError(
            "Domain name must not be empty".to_string(),
        ));
    }
    if domain.chars().any(char::is_whitespace) || !has_inner_dot(domain) {
        return Err(CoreError::ValidationError(format!(
            "Invalid domain name format: '{domain}'"
        )));
    }
    Ok(domain.to_string())
}

/// A nameserver entry is usable when it is non-empty, has no spaces and contains a dot.
pub fn is_valid_nameserver(entry: &str) -> bool {
    let entry = entry.trim();
    !entry.is_empty() && !entry.chars().any(char::is_whitespace) && has_inner_dot(entry)
}

/// Validate a nameserver set and return the trimmed entries in the given order.
pub fn validate_nameservers(nameservers: &[String]) -> CoreResult<Vec<String>> {
    if !(MIN_NAMESERVERS..=MAX_NAMESERVERS).contains(&nameservers.len()) {
        return Err(CoreError::ValidationError(format!(
            "Expected {MIN_NAMESERVERS} to {MAX_NAMESERVERS} nameservers, got {}",
            nameservers.len()
        )));
    }

    let mut cleaned: Vec<String> = Vec::with_capacity(nameservers.len());
    for (index, entry) in nameservers.iter().enumerate() {
        let entry = entry.trim();
        if entry.is_empty() {
            return Err(CoreError::ValidationError(format!(
                "Nameserver {} is empty",
                index + 1
            )));
        }
        if !is_valid_nameserver(entry) {
            return Err(CoreError::ValidationError(format!(
                "Invalid nameserver '{entry}': must be a host name containing a dot"
            )));
        }
        if cleaned.iter().any(|seen| same_host(seen, entry)) {
            return Err(CoreError::ValidationError(format!(
                "Duplicate nameserver '{entry}'"
            )));
        }
        cleaned.push(entry.to_string());
    }
    Ok(cleaned)
}

/// Validate the inputs of a DNS record upsert.
pub fn validate_record_input(name: &str, content: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Record name must not be empty (use '@' for the zone apex)".to_string(),
        ));
    }
    if name.trim().chars().any(char::is_whitespace) {
        return Err(CoreError::ValidationError(format!(
            "Invalid record name '{}'",
            name.trim()
        )));
    }
    if content.trim().is_empty() {
        return Err(CoreError::ValidationError(
            "Record content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Parse a record type name, limited to the types the updater supports.
pub fn parse_record_type(value: &str) -> CoreResult<DnsRecordType> {
    DnsRecordType::parse(value, "input").map_err(|_| {
        CoreError::ValidationError(format!(
            "Unsupported record type '{}' (expected one of A, AAAA, CNAME, TXT, MX)",
            value.trim()
        ))
    })
}

/// Host names compare case-insensitively and ignore a trailing dot.
pub fn same_host(a: &str, b: &str) -> bool {
    a.trim()
        .trim_end_matches('.')
        .eq_ignore_ascii_case(b.trim().trim_end_matches('.'))
}

/// At least one dot with a label on both sides.
fn has_inner_dot(value: &str) -> bool {
    let value = value.trim_end_matches('.');
    value
        .find('.')
        .is_some_and(|i| i > 0 && i < value.len() - 1)
}
