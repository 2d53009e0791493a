//! Submission subsystem.
//!
//! # Data Flow
//! ```text
//! SignedBlob
//!     → client.rs (LedgerSubmitter sends it, reply captured)
//!     → classify.rs (reply → Success | RetryableConflict | Fatal)
//!     → orchestrator decides what happens next
//! ```
//!
//! # Design Decisions
//! - Only terPRE_SEQ and tefPAST_SEQ are retryable by default
//! - Transport failures are fatal unless explicitly enabled
//! - Remote messages are carried verbatim into errors

pub mod classify;
pub mod client;

pub use classify::{ClassificationTable, ClassifiedResult, ConflictClass};
pub use client::{LedgerResponse, LedgerSubmitter, SubmissionClient};
