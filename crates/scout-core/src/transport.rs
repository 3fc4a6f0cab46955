//! The network seam: anything that can turn query text into ranked results.
//!
//! The controller never talks to the network directly. It hands query text
//! to a [`SearchTransport`] and receives a boxed future that it drives on a
//! background task, so implementations must be cheap to call and must not
//! borrow from `self` in the returned future.

use crate::{error::TransportError, types::ResultItem};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Result of a single transport call.
pub type TransportResult = Result<Vec<ResultItem>, TransportError>;

/// Issues one search against the remote service.
///
/// The returned future must be `'static`: clone whatever handles it needs
/// (HTTP client, endpoint) into it.
pub trait SearchTransport: Send + Sync + 'static {
    fn search(&self, text: String) -> BoxFuture<'static, TransportResult>;
}

impl<T: SearchTransport + ?Sized> SearchTransport for Arc<T> {
    fn search(&self, text: String) -> BoxFuture<'static, TransportResult> {
        (**self).search(text)
    }
}

impl<T: SearchTransport + ?Sized> SearchTransport for Box<T> {
    fn search(&self, text: String) -> BoxFuture<'static, TransportResult> {
        (**self).search(text)
    }
}
