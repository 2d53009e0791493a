//! Metrics collection.
//!
//! Recorded through the `metrics` facade; with no recorder installed every
//! call is a no-op, so embedding applications choose the exporter.
//!
//! # Metrics
//! - `exchange_sequence_fetches_total` (counter): authoritative lookups by outcome
//! - `exchange_submissions_total` (counter): submissions by kind, outcome
//! - `exchange_submission_duration_seconds` (histogram): submission latency
//! - `exchange_sequence_conflicts_total` (counter): retryable conflicts by kind, class
//! - `exchange_operations_total` (counter): finished operations by kind, outcome
//! - `exchange_operation_duration_seconds` (histogram): end-to-end latency incl. retries
//! - `exchange_cached_accounts` (gauge): accounts tracked by the sequence cache

use std::time::Instant;

use crate::exchange::types::OperationKind;
use crate::submission::classify::ConflictClass;

pub fn record_sequence_fetch(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("exchange_sequence_fetches_total", "outcome" => outcome).increment(1);
}

/// `outcome` is one of `success`, `conflict`, `fatal`.
pub fn record_submission(kind: OperationKind, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "exchange_submissions_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "exchange_submission_duration_seconds",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_conflict(kind: OperationKind, class: ConflictClass) {
    metrics::counter!(
        "exchange_sequence_conflicts_total",
        "kind" => kind.as_str(),
        "class" => class.as_str()
    )
    .increment(1);
}

pub fn record_operation(kind: OperationKind, success: bool, start: Instant) {
    let outcome = if success { "success" } else { "error" };
    metrics::counter!(
        "exchange_operations_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "exchange_operation_duration_seconds",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_cached_accounts(count: usize) {
    metrics::gauge!("exchange_cached_accounts").set(count as f64);
}
