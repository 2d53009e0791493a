//! Ledger result classification.
//!
//! The mapping from ledger result codes to retry decisions is a lookup
//! table; new retryable codes are added with `with_retryable`, not by
//! touching the retry loop.

use std::collections::HashMap;

use crate::exchange::types::{ExchangeError, ExchangeResult};
use crate::submission::client::LedgerResponse;

/// Ledger result emitted when a transaction's sequence is ahead of the ledger.
pub const PRIOR_TRANSACTION_MISSING: &str = "terPRE_SEQ";

/// Ledger result emitted when a transaction's sequence was already consumed.
pub const PAST_SEQUENCE: &str = "tefPAST_SEQ";

/// Why a submission may succeed if rebuilt with a fresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictClass {
    /// The sequence is ahead of what the ledger expects.
    PriorTransactionMissing,
    /// The sequence is behind the ledger or already used.
    PastSequence,
    /// No response from the node; only when transport retries are enabled.
    Transport,
}

impl ConflictClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictClass::PriorTransactionMissing => "prior_transaction_missing",
            ConflictClass::PastSequence => "past_sequence",
            ConflictClass::Transport => "transport",
        }
    }
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedResult {
    /// The ledger accepted the transaction.
    Success { hash: String },
    /// The sequence raced with ledger state; rebuild and resubmit.
    RetryableConflict {
        class: ConflictClass,
        result: String,
        message: String,
    },
    /// Anything else. Never retried.
    Fatal(ExchangeError),
}

impl ClassifiedResult {
    /// Label used in logs and metrics.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            ClassifiedResult::Success { .. } => "success",
            ClassifiedResult::RetryableConflict { .. } => "conflict",
            ClassifiedResult::Fatal(_) => "fatal",
        }
    }
}

/// Lookup table deciding which ledger results are retryable.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    retryable: HashMap<String, ConflictClass>,
    retry_transport_failures: bool,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::new()
            .with_retryable(PRIOR_TRANSACTION_MISSING, ConflictClass::PriorTransactionMissing)
            .with_retryable(PAST_SEQUENCE, ConflictClass::PastSequence)
    }
}

impl ClassificationTable {
    /// A table with no retryable results at all.
    pub fn new() -> Self {
        Self {
            retryable: HashMap::new(),
            retry_transport_failures: false,
        }
    }

    /// Treat ledger result `result` as a retryable conflict.
    pub fn with_retryable(mut self, result: impl Into<String>, class: ConflictClass) -> Self {
        self.retryable.insert(result.into(), class);
        self
    }

    /// Treat transport failures as retryable conflicts.
    pub fn with_transport_retries(mut self, enabled: bool) -> Self {
        self.retry_transport_failures = enabled;
        self
    }

    pub fn conflict_class(&self, result: &str) -> Option<ConflictClass> {
        self.retryable.get(result).copied()
    }

    /// Map a raw submission outcome to exactly one classified result.
    pub fn classify(&self, raw: ExchangeResult<LedgerResponse>) -> ClassifiedResult {
        let response = match raw {
            Ok(response) => response,
            Err(ExchangeError::Transport(reason)) if self.retry_transport_failures => {
                return ClassifiedResult::RetryableConflict {
                    class: ConflictClass::Transport,
                    result: ConflictClass::Transport.as_str().to_string(),
                    message: reason,
                };
            }
            Err(e) => return ClassifiedResult::Fatal(e),
        };

        if response.is_success() {
            return match response.hash {
                Some(hash) if !hash.is_empty() => ClassifiedResult::Success { hash },
                _ => ClassifiedResult::Fatal(ExchangeError::MalformedResponse(
                    "success reply without a transaction hash".to_string(),
                )),
            };
        }

        let message = response
            .message
            .unwrap_or_else(|| format!("Request failed with code {}", response.code));
        let class = response
            .result
            .as_deref()
            .and_then(|result| self.conflict_class(result));

        match (class, response.result) {
            (Some(class), Some(result)) => ClassifiedResult::RetryableConflict {
                class,
                result,
                message,
            },
            (_, result) => ClassifiedResult::Fatal(ExchangeError::LedgerRejection {
                code: response.code,
                result,
                message,
            }),
        }
    }
}
