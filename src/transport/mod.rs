//! REST transport subsystem.
//!
//! # Data Flow
//! ```text
//! SequenceCache ──fetch_sequence──▶ rest.rs ──GET /exchange/sequence/{address}──▶ node
//! SubmissionClient ──submit──▶ rest.rs ──POST|DELETE /exchange/sign_*──▶ node
//!                                  ◀── types.rs decodes {code, msg, data}
//! ```
//!
//! # Design Decisions
//! - One reqwest client per session, shared by both collaborator traits
//! - One host picked at random per request
//! - Wall-clock timeouts live here, not in the retry loop

pub mod rest;
pub mod types;

pub use rest::RestTransport;
