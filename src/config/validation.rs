//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (retry budget ≥ 1, port and timeout non-zero)
//! - Reject host entries that carry a scheme or port
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ExchangeConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into a session

use std::fmt;

use crate::config::schema::ExchangeConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &ExchangeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (i, host) in config.hosts.iter().enumerate() {
        let field = format!("hosts[{}]", i);
        if host.trim().is_empty() {
            errors.push(ValidationError::new(field, "host must not be empty"));
        } else if host.contains("://") {
            errors.push(ValidationError::new(field, "host must not include a scheme"));
        } else if host.contains(':') || host.contains('/') {
            errors.push(ValidationError::new(
                field,
                "host must be a bare host name; set the port separately",
            ));
        }
    }

    if config.port == 0 {
        errors.push(ValidationError::new("port", "must be non-zero"));
    }

    if config.retry_budget == 0 {
        errors.push(ValidationError::new("retry_budget", "must be at least 1"));
    }

    if config.request_timeout_secs == 0 {
        errors.push(ValidationError::new("request_timeout_secs", "must be non-zero"));
    }

    if config.default_issuer.trim().is_empty() {
        errors.push(ValidationError::new("default_issuer", "must not be empty"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
