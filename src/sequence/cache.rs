//! Per-account sequence caching with exclusive leases.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::exchange::types::ExchangeResult;
use crate::observability::metrics;
use crate::sequence::source::SequenceSource;

/// One account's entry. `None` until the first authoritative fetch.
type Slot = Arc<Mutex<Option<u64>>>;

/// A thread-safe cache of the next usable sequence per account.
///
/// Every account owns its own async mutex, so work on one account never
/// waits on another. Slots are created on first use and are never removed
/// from the map; `reset` empties them in place so that callers already
/// queued on a slot keep contending on the same lock.
#[derive(Clone)]
pub struct SequenceCache {
    source: Arc<dyn SequenceSource>,
    slots: Arc<DashMap<String, Slot>>,
}

impl SequenceCache {
    /// Create an empty cache backed by `source`.
    pub fn new(source: Arc<dyn SequenceSource>) -> Self {
        Self {
            source,
            slots: Arc::new(DashMap::new()),
        }
    }

    /// Take exclusive hold of `account`'s entry, fetching it on a cold cache.
    ///
    /// The lease keeps the account locked until it is dropped.
    pub async fn lease(&self, account: &str) -> ExchangeResult<SequenceLease> {
        let mut guard = self.slot(account).lock_owned().await;
        let sequence = match *guard {
            Some(sequence) => sequence,
            None => {
                let sequence = fetch_authoritative(self.source.as_ref(), account).await?;
                *guard = Some(sequence);
                metrics::record_cached_accounts(self.slots.len());
                sequence
            }
        };

        Ok(SequenceLease {
            account: account.to_string(),
            sequence,
            guard,
            source: self.source.clone(),
        })
    }

    /// Next usable sequence for `account`, fetching it on a cold cache.
    pub async fn get_next(&self, account: &str) -> ExchangeResult<u64> {
        Ok(self.lease(account).await?.sequence())
    }

    /// Bump `account`'s entry by one after a consumed sequence.
    ///
    /// Calling this for an account that was never fetched is a caller bug; it
    /// is logged and ignored.
    pub async fn advance(&self, account: &str) {
        let Some(slot) = self.slots.get(account).map(|entry| entry.value().clone()) else {
            tracing::error!(account = %account, "Advance requested for an uncached account");
            return;
        };
        let mut guard = slot.lock().await;
        match guard.as_mut() {
            Some(sequence) => *sequence += 1,
            None => tracing::error!(account = %account, "Advance requested for an uncached account"),
        }
    }

    /// Re-fetch `account`'s sequence from the exchange, overwriting the entry.
    pub async fn refresh(&self, account: &str) -> ExchangeResult<u64> {
        let mut guard = self.slot(account).lock_owned().await;
        let sequence = fetch_authoritative(self.source.as_ref(), account).await?;
        *guard = Some(sequence);
        Ok(sequence)
    }

    /// Drop every cached sequence.
    pub async fn reset(&self) {
        let slots: Vec<Slot> = self.slots.iter().map(|entry| entry.value().clone()).collect();
        for slot in slots {
            *slot.lock().await = None;
        }
        metrics::record_cached_accounts(0);
        tracing::debug!("Sequence cache reset");
    }

    /// Cached sequence for `account` without touching the network.
    pub async fn cached(&self, account: &str) -> Option<u64> {
        let slot = self.slots.get(account).map(|entry| entry.value().clone())?;
        let guard = slot.lock().await;
        *guard
    }

    fn slot(&self, account: &str) -> Slot {
        if let Some(slot) = self.slots.get(account) {
            return slot.value().clone();
        }
        self.slots
            .entry(account.to_string())
            .or_default()
            .value()
            .clone()
    }
}

impl fmt::Debug for SequenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceCache")
            .field("accounts", &self.slots.len())
            .finish()
    }
}

/// Exclusive hold on one account's cache entry.
///
/// Reads and writes go straight through to the cache; dropping the lease
/// releases the account for the next caller.
pub struct SequenceLease {
    account: String,
    sequence: u64,
    guard: OwnedMutexGuard<Option<u64>>,
    source: Arc<dyn SequenceSource>,
}

impl SequenceLease {
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Sequence to use for the next transaction.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Mark the current sequence as consumed.
    pub fn advance(&mut self) -> u64 {
        self.sequence += 1;
        *self.guard = Some(self.sequence);
        self.sequence
    }

    /// Replace the entry with the exchange's authoritative value.
    pub async fn refresh(&mut self) -> ExchangeResult<u64> {
        let sequence = fetch_authoritative(self.source.as_ref(), &self.account).await?;
        self.sequence = sequence;
        *self.guard = Some(sequence);
        Ok(sequence)
    }
}

impl fmt::Debug for SequenceLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceLease")
            .field("account", &self.account)
            .field("sequence", &self.sequence)
            .finish()
    }
}

async fn fetch_authoritative(source: &dyn SequenceSource, account: &str) -> ExchangeResult<u64> {
    match source.fetch_sequence(account).await {
        Ok(sequence) => {
            metrics::record_sequence_fetch(true);
            tracing::debug!(account = %account, sequence, "Fetched authoritative sequence");
            Ok(sequence)
        }
        Err(e) => {
            metrics::record_sequence_fetch(false);
            tracing::warn!(account = %account, error = %e, "Sequence lookup failed");
            Err(e)
        }
    }
}
