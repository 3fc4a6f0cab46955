//! [`HttpTransport`] — plain-HTTP implementation of [`SearchTransport`] on the
//! hyper legacy client.
//!
//! The client is pooled and cheap to clone, so each `search` call clones it
//! into its own `'static` future.

use crate::wire;
use bytes::Bytes;
use futures::future::BoxFuture;
use http_body_util::{BodyExt, Empty};
use hyper::{header, Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use scout_core::{SearchTransport, TransportError, TransportResult};
use std::sync::Arc;

/// Rejected endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid search endpoint {endpoint:?}: {reason}")]
    Invalid { endpoint: String, reason: String },
    #[error("unsupported scheme {0:?} (only http endpoints are supported)")]
    UnsupportedScheme(String),
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector, Empty<Bytes>>,
    endpoint: Arc<str>,
}

impl HttpTransport {
    /// Validate `endpoint` and build a pooled client for it.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, EndpointError> {
        let endpoint = endpoint.into();
        let invalid = |reason: &str| EndpointError::Invalid {
            endpoint: endpoint.clone(),
            reason: reason.to_string(),
        };

        let uri: Uri = endpoint.parse().map_err(|e: hyper::http::uri::InvalidUri| invalid(&e.to_string()))?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(other) => return Err(EndpointError::UnsupportedScheme(other.to_string())),
            None => return Err(invalid("missing scheme")),
        }
        if uri.host().is_none() {
            return Err(invalid("missing host"));
        }

        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchTransport for HttpTransport {
    fn search(&self, text: String) -> BoxFuture<'static, TransportResult> {
        let client = self.client.clone();
        let endpoint = Arc::clone(&self.endpoint);

        Box::pin(async move {
            let uri = wire::search_uri(&endpoint, &text)?;
            tracing::debug!(%uri, "http: GET");

            let request = Request::get(uri)
                .header(header::ACCEPT, "application/json")
                .body(Empty::<Bytes>::new())
                .map_err(|e| TransportError::Protocol(e.to_string()))?;

            let response = client
                .request(request)
                .await
                .map_err(|e| TransportError::Network(describe(&e)))?;

            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| TransportError::Network(describe(&e)))?
                .to_bytes();
            tracing::debug!(%status, bytes = body.len(), "http: response");

            if !status.is_success() {
                return Err(TransportError::Protocol(format!("unexpected status {status}")));
            }
            wire::decode_results(&body)
        })
    }
}

/// Flatten an error and its sources into one line; hyper's top-level
/// messages alone ("client error (Connect)") hide the cause.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
