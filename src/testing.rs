//! Scripted collaborators for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::exchange::types::{ExchangeResult, OperationKind};
use crate::sequence::source::SequenceSource;
use crate::submission::client::{LedgerResponse, LedgerSubmitter};
use crate::transaction::wallet::SignedBlob;

enum SourceScript {
    /// Replies in order; the last one repeats.
    Fixed(Vec<ExchangeResult<u64>>),
    /// `start`, `start + 1`, ... one per call.
    Counting(u64),
}

pub(crate) struct ScriptedSource {
    script: SourceScript,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn fixed(replies: Vec<ExchangeResult<u64>>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            script: SourceScript::Fixed(replies),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn counting(start: u64) -> Self {
        Self {
            script: SourceScript::Counting(start),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SequenceSource for ScriptedSource {
    async fn fetch_sequence(&self, _account: &str) -> ExchangeResult<u64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        match &self.script {
            SourceScript::Fixed(replies) => replies[call.min(replies.len() - 1)].clone(),
            SourceScript::Counting(start) => Ok(start + call as u64),
        }
    }
}

/// Replies in order, repeating the last one; records every blob it sees.
pub(crate) struct ScriptedSubmitter {
    replies: Vec<ExchangeResult<LedgerResponse>>,
    seen: Mutex<Vec<(OperationKind, SignedBlob)>>,
}

impl ScriptedSubmitter {
    pub(crate) fn new(replies: Vec<ExchangeResult<LedgerResponse>>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            replies,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn sequences(&self) -> Vec<u64> {
        self.seen.lock().unwrap().iter().map(|(_, blob)| blob.sequence()).collect()
    }

    pub(crate) fn blobs(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, blob)| blob.as_str().to_string())
            .collect()
    }

    pub(crate) fn kinds(&self) -> Vec<OperationKind> {
        self.seen.lock().unwrap().iter().map(|(kind, _)| *kind).collect()
    }
}

#[async_trait]
impl LedgerSubmitter for ScriptedSubmitter {
    async fn submit(&self, kind: OperationKind, blob: &SignedBlob) -> ExchangeResult<LedgerResponse> {
        let call = {
            let mut seen = self.seen.lock().unwrap();
            seen.push((kind, blob.clone()));
            seen.len() - 1
        };
        tokio::task::yield_now().await;
        self.replies[call.min(self.replies.len() - 1)].clone()
    }
}
