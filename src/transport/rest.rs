//! REST transport to the exchange node cluster.
//!
//! # Responsibilities
//! - Look up the authoritative sequence of an account
//! - Submit signed blobs to the per-operation endpoint
//! - Map HTTP and decoding failures onto `ExchangeError`
//!
//! No retries happen here; the orchestrator owns that policy.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::schema::ExchangeConfig;
use crate::exchange::types::{ExchangeError, ExchangeResult, OperationKind};
use crate::sequence::source::SequenceSource;
use crate::submission::client::{LedgerResponse, LedgerSubmitter};
use crate::transaction::wallet::SignedBlob;
use crate::transport::types::{parse_sequence, SequenceData, SubmitData, WireReply};

/// Method and path of the submission endpoint for `kind`.
pub fn submit_endpoint(kind: OperationKind) -> (Method, &'static str) {
    match kind {
        OperationKind::CreateOrder => (Method::POST, "/exchange/sign_order"),
        OperationKind::CancelOrder => (Method::DELETE, "/exchange/sign_cancel_order"),
        OperationKind::Transfer => (Method::POST, "/exchange/sign_payment"),
    }
}

/// HTTP client bound to one configured cluster.
#[derive(Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    hosts: Vec<String>,
    port: u16,
    scheme: &'static str,
}

impl RestTransport {
    pub fn new(config: &ExchangeConfig) -> ExchangeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            hosts: config.hosts.clone(),
            port: config.port,
            scheme: config.scheme(),
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Base URL of a randomly chosen host.
    pub fn base_url(&self) -> ExchangeResult<Url> {
        let host = self
            .hosts
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| ExchangeError::Transport("No exchange hosts configured".to_string()))?;

        let raw = format!("{}://{}:{}", self.scheme, host, self.port);
        Url::parse(&raw)
            .map_err(|e| ExchangeError::Configuration(format!("Invalid exchange URL '{}': {}", raw, e)))
    }

    fn sequence_url(&self, account: &str) -> ExchangeResult<Url> {
        let mut url = self.base_url()?;
        url.path_segments_mut()
            .map_err(|_| ExchangeError::Configuration("Exchange URL cannot carry a path".to_string()))?
            .clear()
            .extend(["exchange", "sequence", account]);
        Ok(url)
    }

    fn submit_url(&self, path: &str) -> ExchangeResult<Url> {
        let mut url = self.base_url()?;
        url.set_path(path);
        Ok(url)
    }
}

fn transport_error(e: reqwest::Error) -> ExchangeError {
    if e.is_timeout() {
        ExchangeError::Transport(format!("Request timed out: {}", e))
    } else {
        ExchangeError::Transport(e.to_string())
    }
}

async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> ExchangeResult<WireReply<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(ExchangeError::Transport(format!(
            "Unexpected HTTP status {} from {}",
            status,
            response.url()
        )));
    }

    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body)
        .map_err(|e| ExchangeError::MalformedResponse(format!("Undecodable exchange reply: {}", e)))
}

#[async_trait]
impl SequenceSource for RestTransport {
    async fn fetch_sequence(&self, account: &str) -> ExchangeResult<u64> {
        let url = self.sequence_url(account)?;
        tracing::debug!(url = %url, "Fetching account sequence");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let reply: WireReply<SequenceData> = read_reply(response).await?;

        if !reply.is_success() {
            return Err(ExchangeError::RemoteQuery {
                message: reply.message_or_code(),
                code: reply.code,
            });
        }

        let data = reply
            .data
            .ok_or_else(|| ExchangeError::MalformedResponse("Sequence reply carries no data".to_string()))?;
        parse_sequence(&data.sequence)
    }
}

#[async_trait]
impl LedgerSubmitter for RestTransport {
    async fn submit(&self, kind: OperationKind, blob: &SignedBlob) -> ExchangeResult<LedgerResponse> {
        let (method, path) = submit_endpoint(kind);
        let url = self.submit_url(path)?;
        tracing::debug!(url = %url, method = %method, sequence = blob.sequence(), "Submitting signed blob");

        let response = self
            .client
            .request(method, url)
            .form(&[("sign", blob.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let reply: WireReply<SubmitData> = read_reply(response).await?;
        Ok(reply.into_ledger_response())
    }
}
