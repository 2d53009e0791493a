//! Operation kinds and error definitions shared by every subsystem.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three transaction-producing operations the exchange accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreateOrder,
    CancelOrder,
    Transfer,
}

impl OperationKind {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::CreateOrder => "create_order",
            OperationKind::CancelOrder => "cancel_order",
            OperationKind::Transfer => "transfer",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the exchange client.
///
/// Variants that originate at the exchange display the remote message
/// verbatim so callers see the same reason the node reported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExchangeError {
    /// Caller input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The sequence endpoint answered with a non-zero code.
    #[error("{message}")]
    RemoteQuery { code: String, message: String },

    /// Local transaction construction or signing failed.
    #[error("{0}")]
    Signing(String),

    /// The ledger kept reporting a sequence race until the retry budget ran out.
    #[error("{message}")]
    LedgerConflict { result: String, message: String },

    /// The ledger rejected the transaction for a non-retryable reason.
    #[error("{message}")]
    LedgerRejection {
        code: String,
        result: Option<String>,
        message: String,
    },

    /// No usable response from the node (connect failure, timeout, HTTP error).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a body that does not follow the reply contract.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation was attempted before `init` or after `destroy`.
    #[error("Exchange client is not initialized")]
    NotInitialized,
}

impl ExchangeError {
    /// Whether the error is a ledger-level sequence race.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ExchangeError::LedgerConflict { .. })
    }
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
