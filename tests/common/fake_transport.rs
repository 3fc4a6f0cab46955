//! In-memory [`SearchTransport`] doubles.
//!
//! - [`ScriptedTransport`] answers each query text from a table, optionally
//!   after a delay, and records every call.
//! - [`PendingTransport`] never answers, so tests can hand-craft settlements
//!   and feed them to `SearchController::apply` in any order.

use futures::future::{self, BoxFuture};
use scout_core::{ResultItem, SearchTransport, TransportError, TransportResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Script {
    result: TransportResult,
    delay: Duration,
}

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    scripts: Arc<Mutex<HashMap<String, Script>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, text: &str, results: Vec<ResultItem>) -> Self {
        self.script(text, Ok(results), Duration::ZERO)
    }

    pub fn answer_after(self, text: &str, delay: Duration, results: Vec<ResultItem>) -> Self {
        self.script(text, Ok(results), delay)
    }

    pub fn fail(self, text: &str, err: TransportError) -> Self {
        self.script(text, Err(err), Duration::ZERO)
    }

    fn script(self, text: &str, result: TransportResult, delay: Duration) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(text.to_string(), Script { result, delay });
        self
    }

    /// Query texts in the order they reached the transport.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchTransport for ScriptedTransport {
    fn search(&self, text: String) -> BoxFuture<'static, TransportResult> {
        self.calls.lock().unwrap().push(text.clone());
        let script = self.scripts.lock().unwrap().get(&text).cloned();
        Box::pin(async move {
            match script {
                Some(Script { result, delay }) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    result
                }
                None => Err(TransportError::Protocol(format!("no script for {text:?}"))),
            }
        })
    }
}

#[derive(Clone, Copy, Default)]
pub struct PendingTransport;

impl SearchTransport for PendingTransport {
    fn search(&self, _text: String) -> BoxFuture<'static, TransportResult> {
        Box::pin(future::pending())
    }
}
