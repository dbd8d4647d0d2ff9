//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Runs as the last step of resolution, after defaults are applied
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Config → Result<(), Vec<ValidationError>>
//! - No rules yet; new checks are added to `validate_config`

use thiserror::Error;

use crate::config::schema::Config;

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "http.timeout").
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Run every semantic rule against `config`.
pub fn validate_config(_config: &Config) -> Result<(), Vec<ValidationError>> {
    let errors = Vec::new();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl Config {
    /// Check the configuration.
    pub fn check(&self) -> Result<(), Vec<ValidationError>> {
        validate_config(self)
    }
}
