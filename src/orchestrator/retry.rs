//! Sequence-conflict retry state machine.
//!
//! # States
//! ```text
//! Start → BuildAndSign → Submit → Classify
//!     Classify → Done(success)        advance cached sequence, return hash
//!     Classify → RetryBuildAndSign    refresh sequence, sign a new blob
//!     Classify → Done(fatal)          return error, cache untouched
//! ```
//!
//! Each retry rebuilds and re-signs the transaction with the refreshed
//! sequence. A blob signed with a stale sequence is never resubmitted.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::config::schema::DEFAULT_ISSUER;
use crate::exchange::types::{ExchangeError, ExchangeResult, OperationKind};
use crate::observability::metrics;
use crate::sequence::cache::SequenceCache;
use crate::submission::classify::{ClassifiedResult, ConflictClass};
use crate::submission::client::SubmissionClient;
use crate::transaction::types::Operation;
use crate::transaction::wallet::{SignRequest, TxSigner};

/// Submission attempts allowed per operation, including the first.
pub const DEFAULT_RETRY_BUDGET: u32 = 3;

/// Per-invocation retry bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPlan {
    kind: OperationKind,
    remaining: u32,
    attempts: u32,
    sequence: Option<u64>,
}

impl RetryPlan {
    /// A budget of zero is treated as one attempt.
    pub fn new(kind: OperationKind, budget: u32) -> Self {
        Self {
            kind,
            remaining: budget.max(1),
            attempts: 0,
            sequence: None,
        }
    }

    /// Record the start of a submission with `sequence`.
    pub fn begin_attempt(&mut self, sequence: u64) {
        self.remaining = self.remaining.saturating_sub(1);
        self.attempts += 1;
        self.sequence = Some(sequence);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Sequence of the in-flight attempt.
    pub fn sequence(&self) -> Option<u64> {
        self.sequence
    }
}

/// Drives build → sign → submit → classify until success, a fatal error, or
/// an exhausted retry budget.
#[derive(Clone)]
pub struct RetryOrchestrator {
    sequences: SequenceCache,
    signer: Arc<dyn TxSigner>,
    submission: SubmissionClient,
    retry_budget: u32,
    default_issuer: String,
}

impl RetryOrchestrator {
    pub fn new(
        sequences: SequenceCache,
        signer: Arc<dyn TxSigner>,
        submission: SubmissionClient,
        retry_budget: u32,
    ) -> Self {
        Self {
            sequences,
            signer,
            submission,
            retry_budget,
            default_issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Issuer used when an operation does not name one.
    pub fn with_default_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.default_issuer = issuer.into();
        self
    }

    pub fn sequences(&self) -> &SequenceCache {
        &self.sequences
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// Run `operation` for `account` and return the transaction hash.
    pub async fn execute(
        &self,
        account: &str,
        secret: &str,
        operation: &Operation,
    ) -> ExchangeResult<String> {
        let op_id = Uuid::new_v4();
        let kind = operation.kind();
        let start = Instant::now();

        let result = self.run(op_id, account, secret, operation).await;

        metrics::record_operation(kind, result.is_ok(), start);
        match &result {
            Ok(hash) => tracing::info!(
                op_id = %op_id,
                kind = %kind,
                account = %account,
                hash = %hash,
                "Operation committed"
            ),
            Err(e) => tracing::warn!(
                op_id = %op_id,
                kind = %kind,
                account = %account,
                error = %e,
                "Operation failed"
            ),
        }
        result
    }

    async fn run(
        &self,
        op_id: Uuid,
        account: &str,
        secret: &str,
        operation: &Operation,
    ) -> ExchangeResult<String> {
        let kind = operation.kind();
        let body = operation.prepare(&self.default_issuer)?;

        let mut plan = RetryPlan::new(kind, self.retry_budget);
        let mut lease = self.sequences.lease(account).await?;

        loop {
            let sequence = lease.sequence();
            plan.begin_attempt(sequence);

            let blob = self.signer.sign(SignRequest {
                account,
                secret,
                sequence,
                body: &body,
            })?;

            tracing::debug!(
                op_id = %op_id,
                kind = %kind,
                sequence,
                attempt = plan.attempts(),
                remaining = plan.remaining(),
                "Submitting transaction"
            );

            match self.submission.submit(kind, &blob).await {
                ClassifiedResult::Success { hash } => {
                    lease.advance();
                    return Ok(hash);
                }
                ClassifiedResult::RetryableConflict {
                    class,
                    result,
                    message,
                } => {
                    metrics::record_conflict(kind, class);

                    if plan.is_exhausted() {
                        tracing::warn!(
                            op_id = %op_id,
                            kind = %kind,
                            attempts = plan.attempts(),
                            result = %result,
                            "Retry budget exhausted"
                        );
                        return Err(match class {
                            ConflictClass::Transport => ExchangeError::Transport(message),
                            _ => ExchangeError::LedgerConflict { result, message },
                        });
                    }

                    let fresh = lease.refresh().await?;
                    tracing::info!(
                        op_id = %op_id,
                        kind = %kind,
                        stale_sequence = sequence,
                        fresh_sequence = fresh,
                        result = %result,
                        "Sequence conflict, retrying with refreshed sequence"
                    );
                }
                ClassifiedResult::Fatal(err) => return Err(err),
            }
        }
    }
}
