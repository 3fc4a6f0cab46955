//! scout-transport — network adapters for scout.
//!
//! [`HttpTransport`] issues `GET <endpoint>?q=<text>` requests and decodes
//! the `{ "results": [...] }` payload; [`wire`] holds the codec on its own so
//! it can be tested without a socket.

pub mod http;
pub mod wire;

pub use http::{EndpointError, HttpTransport};
