//! In-memory transport with scripted responses, for tests and offline demos.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiDescriptor;
use crate::endpoint::Endpoint;
use crate::error::{Result, RpcError};
use crate::transport::RpcTransport;

/// A call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub args: Option<Value>,
}

/// Transport answering each endpoint from a queue of scripted replies.
///
/// An endpoint with an empty queue answers `null`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<Endpoint, VecDeque<Result<Value>>>>,
    init_failures: Mutex<VecDeque<RpcError>>,
    calls: Mutex<Vec<RecordedCall>>,
    initializations: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply for `endpoint`.
    pub fn reply(&self, endpoint: Endpoint, value: Value) -> &Self {
        self.push(endpoint, Ok(value))
    }

    /// Queues a failure for `endpoint`.
    pub fn fail(&self, endpoint: Endpoint, error: RpcError) -> &Self {
        self.push(endpoint, Err(error))
    }

    /// Makes the next initialization attempt fail with `error`.
    pub fn fail_initialization(&self, error: RpcError) -> &Self {
        if let Ok(mut failures) = self.init_failures.lock() {
            failures.push_back(error);
        }
        self
    }

    /// Number of `initialize` calls received, failed ones included.
    pub fn initializations(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Endpoints called so far, in order.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.calls().into_iter().map(|call| call.endpoint).collect()
    }

    fn push(&self, endpoint: Endpoint, reply: Result<Value>) -> &Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.entry(endpoint).or_default().push_back(reply);
        }
        self
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn initialize(&self, _api: &ApiDescriptor) -> Result<()> {
        self.initializations.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .init_failures
            .lock()
            .ok()
            .and_then(|mut failures| failures.pop_front());
        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn invoke(&self, endpoint: Endpoint, args: Option<Value>) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                endpoint,
                args: args.clone(),
            });
        }
        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.get_mut(&endpoint).and_then(VecDeque::pop_front));
        reply.unwrap_or(Ok(Value::Null))
    }
}
