//! Test builders for result lists and controllers.

use scout_core::{ControllerOptions, ResultItem, SearchController, SearchTransport};
use std::time::Duration;

/// Shorthand for a single hit.
pub fn hit(url: &str, score: f64) -> ResultItem {
    ResultItem::new(url, score)
}

/// `n` hits under `prefix` with descending scores, e.g. `https://a-0.example`.
pub fn ranked(prefix: &str, n: usize) -> Vec<ResultItem> {
    (0..n)
        .map(|i| hit(&format!("https://{prefix}-{i}.example"), 1.0 - i as f64 / (n as f64 + 1.0)))
        .collect()
}

/// Fluent builder for [`SearchController`] test instances.
pub struct ControllerBuilder {
    options: ControllerOptions,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self { options: ControllerOptions { request_timeout: None, cancel_superseded: true } }
    }

    pub fn timeout(mut self, limit: Duration) -> Self {
        self.options.request_timeout = Some(limit);
        self
    }

    pub fn keep_superseded(mut self) -> Self {
        self.options.cancel_superseded = false;
        self
    }

    pub fn build(self, transport: impl SearchTransport) -> SearchController {
        SearchController::new(transport, self.options)
    }
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
