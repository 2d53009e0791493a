//! Authoritative sequence lookup.

use async_trait::async_trait;

use crate::exchange::types::ExchangeResult;

/// Retrieves the next sequence the ledger expects from `account`.
///
/// Implementations do not retry; a failed lookup is reported as-is.
#[async_trait]
pub trait SequenceSource: Send + Sync {
    async fn fetch_sequence(&self, account: &str) -> ExchangeResult<u64>;
}
