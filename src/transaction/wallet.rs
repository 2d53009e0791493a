//! Transaction signing.
//!
//! # Security
//! - Secrets are parsed per signature and never stored
//! - Secrets are never logged or serialized

use std::fmt;

use alloy::primitives::{hex, keccak256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use serde::Serialize;

use crate::exchange::types::{ExchangeError, ExchangeResult};
use crate::transaction::types::{TxBody, TX_FEE_DROPS};

/// Everything a signer needs to produce one blob.
#[derive(Clone, Copy)]
pub struct SignRequest<'a> {
    pub account: &'a str,
    pub secret: &'a str,
    pub sequence: u64,
    pub body: &'a TxBody,
}

impl fmt::Debug for SignRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignRequest")
            .field("account", &self.account)
            .field("sequence", &self.sequence)
            .field("body", self.body)
            .finish_non_exhaustive()
    }
}

/// A fully built and signed transaction, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedBlob {
    sequence: u64,
    hex: String,
}

impl SignedBlob {
    pub fn new(sequence: u64, hex: String) -> Self {
        Self { sequence, hex }
    }

    /// Sequence the blob was signed with.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

/// Builds and signs a transaction for a given sequence.
///
/// Implementations must be deterministic in their inputs so that a retry with
/// a new sequence always yields a new blob.
pub trait TxSigner: Send + Sync {
    fn sign(&self, request: SignRequest<'_>) -> ExchangeResult<SignedBlob>;
}

#[derive(Serialize)]
struct UnsignedTx<'a> {
    account: &'a str,
    sequence: u64,
    fee: u64,
    #[serde(flatten)]
    body: &'a TxBody,
}

/// Default signer: secp256k1 over the keccak-256 digest of the JSON payload.
///
/// The secret is a hex-encoded private key, with or without `0x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSigner;

impl LocalSigner {
    pub fn new() -> Self {
        Self
    }
}

impl TxSigner for LocalSigner {
    fn sign(&self, request: SignRequest<'_>) -> ExchangeResult<SignedBlob> {
        let key_hex = request.secret.strip_prefix("0x").unwrap_or(request.secret);
        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ExchangeError::Signing(format!("Invalid secret: {}", e)))?;

        let payload = serde_json::to_vec(&UnsignedTx {
            account: request.account,
            sequence: request.sequence,
            fee: TX_FEE_DROPS,
            body: request.body,
        })
        .map_err(|e| ExchangeError::Signing(format!("Failed to encode transaction: {}", e)))?;

        let digest = keccak256(&payload);
        let signature = signer
            .sign_hash_sync(&digest)
            .map_err(|e| ExchangeError::Signing(format!("Signing failed: {}", e)))?;

        let mut blob = hex::encode_upper(&payload);
        blob.push_str(&hex::encode_upper(signature.as_bytes()));

        tracing::trace!(
            account = %request.account,
            sequence = request.sequence,
            digest = %digest,
            "Transaction signed"
        );

        Ok(SignedBlob::new(request.sequence, blob))
    }
}
