//! Exchange client with a sequence-conflict retry engine.
//!
//! Builds, signs and submits order-creation, order-cancellation and transfer
//! transactions against an exchange node cluster, recovering transparently
//! when the ledger reports that a sequence number was already used or is
//! ahead of the ledger.
//!
//! # Architecture Overview
//!
//! ```text
//!   create_order / cancel_order / transfer
//!              │
//!              ▼
//!   ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//!   │  ExchangeClient  │────▶│ RetryOrchestrator│────▶│  SequenceCache   │
//!   │  (session swap)  │     │  (retry budget)  │     │ (per-account     │
//!   └──────────────────┘     └────────┬─────────┘     │  locks, DashMap) │
//!                                     │               └────────┬─────────┘
//!                      ┌──────────────┼──────────────┐         │ fetch
//!                      ▼              ▼              ▼         ▼
//!               ┌────────────┐ ┌────────────┐ ┌────────────────────────┐
//!               │ transaction│ │ submission │ │      transport         │
//!               │ (validate, │ │ (classify  │─▶│ (reqwest REST client) │
//!               │  sign)     │ │  replies)  │ └────────────────────────┘
//!               └────────────┘ └────────────┘
//!
//!   Cross-cutting: config (TOML + validation), observability (tracing, metrics)
//! ```

// Core engine
pub mod orchestrator;
pub mod sequence;
pub mod submission;
pub mod transaction;

// Public surface and collaborators
pub mod exchange;
pub mod transport;

// Cross-cutting concerns
pub mod config;
pub mod observability;

#[cfg(test)]
mod testing;

pub use config::schema::ExchangeConfig;
pub use exchange::client::ExchangeClient;
pub use exchange::types::{ExchangeError, ExchangeResult, OperationKind};
pub use transaction::types::{CancelParams, OrderParams, TransferParams};
