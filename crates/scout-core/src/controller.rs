//! Search lifecycle controller — owns the query text and reconciles
//! asynchronous transport outcomes into visible state.
//!
//! # Generations
//!
//! Every effective [`SearchController::submit`] bumps `current_generation` by
//! one and tags the dispatched request with it. When the request settles, the
//! outcome is applied only if its generation still equals
//! `current_generation`; anything older has been superseded by a newer
//! submission and is dropped without touching state. This makes the visible
//! state independent of the order in which responses arrive.
//!
//! # Threading
//!
//! The controller is owned by one thread (the UI loop or the headless
//! driver). Transport futures run on tokio tasks and only ever send a
//! [`Settlement`] back over a channel; the owner drains that channel with
//! [`SearchController::poll_settlements`] or awaits it with
//! [`SearchController::next_settlement`]. `submit` must be called from within
//! a tokio runtime context.

use crate::{
    config::SearchConfig,
    error::TransportError,
    transport::SearchTransport,
    types::{Generation, ResultItem, SearchOutcome, SearchRequest, Settlement, Status},
};
use futures::FutureExt;
use std::{any::Any, panic::AssertUnwindSafe, sync::Arc, time::Duration};
use tokio::{sync::mpsc, task::AbortHandle};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything the renderer needs, owned exclusively by [`SearchController`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    query_text: String,
    current_generation: Generation,
    latest_applied_generation: Generation,
    results: Vec<ResultItem>,
    status: Status,
    last_error: Option<TransportError>,
    /// Text of the current-generation request until it settles.
    in_flight_text: Option<String>,
}

impl ControllerState {
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn current_generation(&self) -> Generation {
        self.current_generation
    }

    /// Generation of the last successful outcome that replaced `results`.
    pub fn latest_applied_generation(&self) -> Generation {
        self.latest_applied_generation
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Reason of the most recent applied failure. Cleared by the next applied
    /// success.
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_error.as_ref()
    }

    /// The text that was submitted for the request still awaiting its
    /// outcome. Unlike `query_text`, edits after `submit` do not change it.
    pub fn in_flight_text(&self) -> Option<&str> {
        self.in_flight_text.as_deref()
    }
}

/// What happened to a settlement handed to [`SearchController::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Results replaced; carries the new result count.
    Results(usize),
    /// Status moved to `Error`; results kept.
    Failed,
    /// A newer submission exists; nothing changed.
    Superseded,
}

/// Dispatch behaviour, usually built from the `[search]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Fail a request with [`TransportError::Timeout`] after this long.
    pub request_timeout: Option<Duration>,
    /// Abort the previous in-flight task when a new search is submitted.
    pub cancel_superseded: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self { request_timeout: None, cancel_superseded: true }
    }
}

impl From<&SearchConfig> for ControllerOptions {
    fn from(cfg: &SearchConfig) -> Self {
        Self {
            request_timeout: (cfg.request_timeout_ms > 0)
                .then(|| Duration::from_millis(cfg.request_timeout_ms)),
            cancel_superseded: cfg.cancel_superseded,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct SearchController {
    state: ControllerState,
    transport: Arc<dyn SearchTransport>,
    options: ControllerOptions,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    settle_rx: mpsc::UnboundedReceiver<Settlement>,
    /// Generation of the last settlement that matched `current_generation`.
    settled_generation: Generation,
    in_flight: Option<AbortHandle>,
}

impl SearchController {
    pub fn new(transport: impl SearchTransport, options: ControllerOptions) -> Self {
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        Self {
            state: ControllerState::default(),
            transport: Arc::new(transport),
            options,
            settle_tx,
            settle_rx,
            settled_generation: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    /// True while the current generation has been dispatched but not settled.
    pub fn is_in_flight(&self) -> bool {
        self.state.current_generation > self.settled_generation
    }

    /// Overwrite the query text. Never touches `results` or `status`.
    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.state.query_text = text.into();
    }

    /// Issue a search for the current query text.
    ///
    /// Whitespace-only text is a no-op and returns `None`. Otherwise the
    /// generation is bumped, status becomes `Loading` (previous results stay
    /// visible) and the request is dispatched on a background task.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        if self.state.query_text.trim().is_empty() {
            tracing::debug!("search: empty query ignored");
            return None;
        }

        self.state.current_generation += 1;
        self.state.status = Status::Loading;

        let request = SearchRequest {
            generation: self.state.current_generation,
            text: self.state.query_text.clone(),
        };
        self.state.in_flight_text = Some(request.text.clone());
        tracing::debug!(
            generation = request.generation,
            text = %request.text,
            "search: submitted"
        );

        if self.options.cancel_superseded {
            if let Some(previous) = self.in_flight.take() {
                tracing::debug!("search: aborting superseded request");
                previous.abort();
            }
        }

        self.dispatch(&request);
        Some(request)
    }

    fn dispatch(&mut self, request: &SearchRequest) {
        let call = self.transport.search(request.text.clone());
        let timeout = self.options.request_timeout;
        let generation = request.generation;
        let tx = self.settle_tx.clone();

        let handle = tokio::spawn(async move {
            // A panicking transport still settles its generation.
            let call = AssertUnwindSafe(call).catch_unwind().map(|caught| {
                caught.unwrap_or_else(|payload| {
                    Err(TransportError::Protocol(format!(
                        "transport panicked: {}",
                        panic_message(payload.as_ref())
                    )))
                })
            });
            let result = match timeout {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::Timeout(limit)),
                },
                None => call.await,
            };
            // The receiver only disappears with the controller itself.
            let _ = tx.send(Settlement { generation, outcome: result.into() });
        });
        self.in_flight = Some(handle.abort_handle());
    }

    /// Reconcile one settlement into visible state.
    pub fn apply(&mut self, settlement: Settlement) -> Applied {
        let Settlement { generation, outcome } = settlement;

        if generation != self.state.current_generation {
            tracing::debug!(
                generation,
                current = self.state.current_generation,
                "search: superseded outcome discarded"
            );
            return Applied::Superseded;
        }

        self.settled_generation = generation;
        self.in_flight = None;
        self.state.in_flight_text = None;

        match outcome {
            SearchOutcome::Success(results) => {
                let count = results.len();
                tracing::debug!(generation, count, "search: results applied");
                self.state.results = results;
                self.state.status = Status::Success;
                self.state.latest_applied_generation = generation;
                self.state.last_error = None;
                Applied::Results(count)
            }
            SearchOutcome::Failure(err) => {
                tracing::warn!(generation, error = %err, "search: request failed");
                self.state.status = Status::Error;
                self.state.last_error = Some(err);
                Applied::Failed
            }
        }
    }

    /// Apply every settlement that has already arrived, without waiting.
    /// Superseded settlements are included in the returned list.
    pub fn poll_settlements(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(settlement) = self.settle_rx.try_recv() {
            applied.push(self.apply(settlement));
        }
        applied
    }

    /// Wait for exactly one settlement (current or superseded) and apply it.
    ///
    /// Only call this when a request is known to be outstanding; with nothing
    /// in flight it waits forever.
    pub async fn recv_settlement(&mut self) -> Option<Applied> {
        let settlement = self.settle_rx.recv().await?;
        Some(self.apply(settlement))
    }

    /// Wait until the current generation settles, applying and skipping any
    /// superseded settlements on the way. Returns `None` when nothing is in
    /// flight.
    pub async fn next_settlement(&mut self) -> Option<Applied> {
        while self.is_in_flight() {
            match self.recv_settlement().await? {
                Applied::Superseded => continue,
                applied => return Some(applied),
            }
        }
        None
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
