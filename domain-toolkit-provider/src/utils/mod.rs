//! Utility modules.

/// Date/time parsing and serialization helpers shared by providers.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
