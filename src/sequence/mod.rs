//! Sequence tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Operation for account A
//!     → cache.rs (lease A's slot; cold slot → source.rs fetch)
//!     → sequence used for build/sign/submit
//!     → lease.advance() on success | lease.refresh() on conflict
//!     → lease dropped, A released
//! ```
//!
//! # Design Decisions
//! - One async mutex per account, never a global lock
//! - The lease is held across the whole submit cycle, so concurrent callers
//!   on one account are handed consecutive sequences instead of duplicates
//! - Remote fetches replace the cached value; advances add exactly one

pub mod cache;
pub mod source;

pub use cache::{SequenceCache, SequenceLease};
pub use source::SequenceSource;
