//! scout-core — search lifecycle core for the scout console.
//!
//! This crate owns everything with a behavioural contract: the
//! [`SearchController`] state machine, the [`SearchTransport`] seam it
//! dispatches through, the shared types and the configuration layer.
//!
//! # Data flow
//!
//! ```text
//! keystrokes ──► set_query_text ──► submit ──► SearchTransport (tokio task)
//!                                      ▲                │
//!                                      └── Settlement ◄─┘  (applied only if
//!                                                          still current)
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod transport;
pub mod types;

pub use controller::{Applied, ControllerOptions, ControllerState, SearchController};
pub use error::TransportError;
pub use transport::{SearchTransport, TransportResult};
pub use types::{Generation, ResultItem, SearchOutcome, SearchRequest, Settlement, Status};
