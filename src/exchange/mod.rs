//! Public client surface.
//!
//! # Data Flow
//! ```text
//! ExchangeClient::init(ExchangeConfig)
//!     → validation → RestTransport → SequenceCache → RetryOrchestrator
//!     → stored as the current session
//!
//! create_order / cancel_order / transfer
//!     → current session's RetryOrchestrator → transaction hash | ExchangeError
//! ```
//!
//! # Design Decisions
//! - The session is swapped atomically; in-flight calls keep the one they started on
//! - Operations after `destroy` fail with `NotInitialized`

pub mod client;
pub mod types;

pub use client::ExchangeClient;
pub use types::{ExchangeError, ExchangeResult, OperationKind};
