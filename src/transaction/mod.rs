//! Transaction construction and signing.
//!
//! # Data Flow
//! ```text
//! Operation (caller parameters)
//!     → types.rs (validate, lower into TxBody)
//!     → wallet.rs (TxSigner: sign TxBody + sequence into a SignedBlob)
//! ```
//!
//! # Security Constraints
//! - Secrets are borrowed for the duration of one signature only
//! - Never log secrets or raw key material

pub mod types;
pub mod wallet;

pub use types::{
    Amount, CancelParams, Operation, OrderDirection, OrderParams, TransferParams, TxBody,
};
pub use wallet::{LocalSigner, SignRequest, SignedBlob, TxSigner};
