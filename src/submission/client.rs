//! Signed blob submission.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::exchange::types::{ExchangeResult, OperationKind};
use crate::observability::metrics;
use crate::submission::classify::{ClassificationTable, ClassifiedResult};
use crate::transaction::wallet::SignedBlob;

/// Raw reply of the exchange to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerResponse {
    /// `"0"` on success.
    pub code: String,
    pub message: Option<String>,
    pub hash: Option<String>,
    /// Ledger engine result, e.g. `tefPAST_SEQ`.
    pub result: Option<String>,
}

impl LedgerResponse {
    pub const SUCCESS_CODE: &'static str = "0";

    pub fn success(hash: &str) -> Self {
        Self {
            code: Self::SUCCESS_CODE.to_string(),
            message: None,
            hash: Some(hash.to_string()),
            result: None,
        }
    }

    pub fn failure(code: &str, message: Option<&str>, result: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            message: message.map(str::to_string),
            hash: None,
            result: result.map(str::to_string),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS_CODE
    }
}

/// Sends a signed blob to the exchange.
///
/// `Err` is reserved for failures to obtain a reply; ledger rejections come
/// back as a non-success `LedgerResponse`.
#[async_trait]
pub trait LedgerSubmitter: Send + Sync {
    async fn submit(&self, kind: OperationKind, blob: &SignedBlob) -> ExchangeResult<LedgerResponse>;
}

/// Submits blobs and classifies every reply.
#[derive(Clone)]
pub struct SubmissionClient {
    submitter: Arc<dyn LedgerSubmitter>,
    table: ClassificationTable,
}

impl SubmissionClient {
    pub fn new(submitter: Arc<dyn LedgerSubmitter>, table: ClassificationTable) -> Self {
        Self { submitter, table }
    }

    pub fn table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Submit `blob` and classify the reply.
    pub async fn submit(&self, kind: OperationKind, blob: &SignedBlob) -> ClassifiedResult {
        let start = Instant::now();
        let raw = self.submitter.submit(kind, blob).await;
        let outcome = self.table.classify(raw);

        metrics::record_submission(kind, outcome.outcome_label(), start);
        tracing::debug!(
            kind = %kind,
            sequence = blob.sequence(),
            outcome = outcome.outcome_label(),
            "Submission classified"
        );
        outcome
    }
}
