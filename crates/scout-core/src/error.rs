//! Failure taxonomy for search transports.
//!
//! An empty query is not an error (it is a no-op inside the controller) and a
//! superseded outcome is not an error either (it is discarded), so neither
//! appears here.

use std::time::Duration;

/// Why a dispatched search failed to produce results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response: connection refused, reset, DNS.
    #[error("network error: {0}")]
    Network(String),
    /// A response arrived but was not a valid search payload.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// No response within the configured request timeout.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}
