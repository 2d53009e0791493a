//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! sequence cache, submission client, orchestrator produce:
//!     → tracing events (fetches, submissions, conflicts, outcomes)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers (chosen by the embedding application):
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → any `metrics` recorder / exporter
//! ```
//!
//! # Design Decisions
//! - Every operation carries a UUID v4 operation id in its log events
//! - Secrets never appear in events
//! - Metrics are cheap (no-ops without a recorder)

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
