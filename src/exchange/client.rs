//! Public exchange client.
//!
//! # Responsibilities
//! - Own the current session (config, transport, sequence cache, orchestrator)
//! - Swap sessions atomically on `init` and release them on `destroy`
//! - Expose the create-order, cancel-order and transfer operations

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::schema::ExchangeConfig;
use crate::config::validation::validate_config;
use crate::exchange::types::{ExchangeError, ExchangeResult};
use crate::orchestrator::retry::RetryOrchestrator;
use crate::sequence::cache::SequenceCache;
use crate::sequence::source::SequenceSource;
use crate::submission::classify::ClassificationTable;
use crate::submission::client::{LedgerSubmitter, SubmissionClient};
use crate::transaction::types::{CancelParams, Operation, OrderParams, TransferParams};
use crate::transaction::wallet::{LocalSigner, TxSigner};
use crate::transport::rest::RestTransport;

/// Everything built by one successful `init`.
struct Session {
    config: ExchangeConfig,
    orchestrator: RetryOrchestrator,
}

/// Exchange client with sequence-conflict recovery.
///
/// Cheap to share behind an `Arc`; operations on different accounts run in
/// parallel, operations on the same account are serialised per account.
pub struct ExchangeClient {
    session: ArcSwapOption<Session>,
    signer: Arc<dyn TxSigner>,
}

impl Default for ExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeClient {
    /// Uninitialised client using [`LocalSigner`].
    pub fn new() -> Self {
        Self::with_signer(Arc::new(LocalSigner::new()))
    }

    /// Uninitialised client using a caller-supplied transaction builder.
    pub fn with_signer(signer: Arc<dyn TxSigner>) -> Self {
        Self {
            session: ArcSwapOption::empty(),
            signer,
        }
    }

    /// Validate `config` and start a session against its REST endpoints.
    ///
    /// Replaces any previous session; its cached sequences are not carried
    /// over.
    pub fn init(&self, config: ExchangeConfig) -> ExchangeResult<()> {
        validate(&config)?;
        let transport = Arc::new(RestTransport::new(&config)?);
        self.install(config, transport.clone(), transport);
        Ok(())
    }

    /// Like [`init`](Self::init), with caller-supplied collaborators instead
    /// of the REST transport.
    pub fn init_with(
        &self,
        config: ExchangeConfig,
        source: Arc<dyn SequenceSource>,
        submitter: Arc<dyn LedgerSubmitter>,
    ) -> ExchangeResult<()> {
        validate(&config)?;
        self.install(config, source, submitter);
        Ok(())
    }

    fn install(
        &self,
        config: ExchangeConfig,
        source: Arc<dyn SequenceSource>,
        submitter: Arc<dyn LedgerSubmitter>,
    ) {
        let table = ClassificationTable::default().with_transport_retries(config.retry_transport_failures);
        let orchestrator = RetryOrchestrator::new(
            SequenceCache::new(source),
            self.signer.clone(),
            SubmissionClient::new(submitter, table),
            config.retry_budget,
        )
        .with_default_issuer(config.default_issuer.clone());

        tracing::info!(
            hosts = ?config.hosts,
            port = config.port,
            https = config.https,
            retry_budget = config.retry_budget,
            "Exchange client initialized"
        );

        let previous = self.session.swap(Some(Arc::new(Session { config, orchestrator })));
        if previous.is_some() {
            tracing::info!("Previous exchange session replaced");
        }
    }

    /// Release the current session. Safe to call when never initialised.
    pub fn destroy(&self) {
        if self.session.swap(None).is_some() {
            tracing::info!("Exchange client destroyed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.load().is_some()
    }

    /// Retry budget of the current session.
    pub fn retry_budget(&self) -> Option<u32> {
        self.session.load_full().map(|s| s.config.retry_budget)
    }

    /// Configuration of the current session.
    pub fn config(&self) -> Option<ExchangeConfig> {
        self.session.load_full().map(|s| s.config.clone())
    }

    /// Sequence cache of the current session.
    pub fn sequences(&self) -> ExchangeResult<SequenceCache> {
        Ok(self.current()?.orchestrator.sequences().clone())
    }

    /// Forget every cached sequence of the current session.
    pub async fn reset_sequences(&self) -> ExchangeResult<()> {
        let session = self.current()?;
        session.orchestrator.sequences().reset().await;
        Ok(())
    }

    /// Place an order; returns the transaction hash.
    pub async fn create_order(&self, address: &str, secret: &str, params: OrderParams) -> ExchangeResult<String> {
        self.execute(address, secret, Operation::CreateOrder(params)).await
    }

    /// Cancel the offer created at `params.offer_sequence`; returns the transaction hash.
    pub async fn cancel_order(&self, address: &str, secret: &str, params: CancelParams) -> ExchangeResult<String> {
        self.execute(address, secret, Operation::CancelOrder(params)).await
    }

    /// Send a payment; returns the transaction hash.
    pub async fn transfer(&self, address: &str, secret: &str, params: TransferParams) -> ExchangeResult<String> {
        self.execute(address, secret, Operation::Transfer(params)).await
    }

    async fn execute(&self, address: &str, secret: &str, operation: Operation) -> ExchangeResult<String> {
        // Held for the whole call so a concurrent destroy or re-init cannot
        // pull the session out from under it.
        let session = self.current()?;
        session.orchestrator.execute(address, secret, &operation).await
    }

    fn current(&self) -> ExchangeResult<Arc<Session>> {
        self.session.load_full().ok_or(ExchangeError::NotInitialized)
    }
}

fn validate(config: &ExchangeConfig) -> ExchangeResult<()> {
    validate_config(config).map_err(|errors| {
        let joined: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ExchangeError::Configuration(joined.join(", "))
    })
}
