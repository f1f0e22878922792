//! Fake transport for testing
//!
//! Replays fixture bodies instead of making HTTP calls, and records every
//! request it receives.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::gateway::errors::TransportError;
use crate::gateway::transport::GenerationTransport;

/// A request seen by the fake transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedCall {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// Fake transport (replays replies in order; the last one repeats)
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Vec<Result<String, TransportError>>,
    next: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    /// Always answer with `response`
    pub fn new(response: &str) -> Self {
        Self::with_sequence(vec![Ok(response.to_string())])
    }

    /// Always fail with `error`
    pub fn with_error(error: TransportError) -> Self {
        Self::with_sequence(vec![Err(error)])
    }

    /// Answer with each reply in turn
    pub fn with_sequence(replies: Vec<Result<String, TransportError>>) -> Self {
        Self {
            replies,
            next: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.lock_calls().last().cloned()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl GenerationTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, TransportError> {
        self.lock_calls().push(RecordedCall {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        });

        let index = self.next.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(index).or_else(|| self.replies.last()) {
            Some(reply) => reply.clone(),
            None => Err(TransportError::Network(
                "fake transport has no reply configured".to_string(),
            )),
        }
    }
}
