//! Retry orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! Operation
//!     → transaction::types (validate; fail fast, no network)
//!     → sequence::SequenceCache (lease account, maybe fetch)
//!     → transaction::wallet (sign with leased sequence)
//!     → submission::SubmissionClient (submit + classify)
//!     → retry.rs (advance | refresh and loop | surface error)
//! ```
//!
//! # Design Decisions
//! - Retry count, not wall-clock time, bounds the conflict loop
//! - Only ledger sequence races are retried
//! - Fatal errors leave the cached sequence untouched

pub mod retry;

pub use retry::{RetryOrchestrator, RetryPlan, DEFAULT_RETRY_BUDGET};
