//! Shared test utilities for scout integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod builders;
pub mod fake_search_api;
pub mod fake_transport;

pub use builders::*;
pub use fake_search_api::{FakeSearchApi, Reply};
pub use fake_transport::{PendingTransport, ScriptedTransport};
