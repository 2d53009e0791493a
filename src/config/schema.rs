//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! default every field, so a file naming only `hosts` is complete.

use serde::{Deserialize, Serialize};

/// Issuer applied to operations that do not name one.
pub const DEFAULT_ISSUER: &str = "jGa9J9TkqtBcUoHe2zqhVFFbgUVED6o9or";

/// Root configuration for an exchange client session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Node host names; one is picked per request.
    pub hosts: Vec<String>,

    pub port: u16,

    /// Use `https` instead of `http`.
    pub https: bool,

    /// Submission attempts per operation, including the first.
    pub retry_budget: u32,

    /// Per-request timeout of the REST transport.
    pub request_timeout_secs: u64,

    pub default_issuer: String,

    /// Treat transport failures during submission as retryable conflicts.
    pub retry_transport_failures: bool,

    pub observability: ObservabilityConfig,
}

impl ExchangeConfig {
    pub fn new(hosts: Vec<String>, port: u16, https: bool) -> Self {
        Self {
            hosts,
            port,
            https,
            ..Self::default()
        }
    }

    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            port: 443,
            https: true,
            retry_budget: 3,
            request_timeout_secs: 10,
            default_issuer: DEFAULT_ISSUER.to_string(),
            retry_transport_failures: false,
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
