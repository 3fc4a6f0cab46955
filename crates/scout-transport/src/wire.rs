//! Wire codec for the search endpoint.
//!
//! Request: `GET <endpoint>?q=<percent-encoded text>`. Every byte outside the
//! RFC 3986 unreserved set is `%XX`-encoded, so spaces become `%20` rather
//! than `+`.
//!
//! Response: a JSON object with a `results` array of `{ url, score }`
//! objects. Unknown fields are ignored; order is preserved as received.

use hyper::Uri;
use scout_core::{ResultItem, TransportError};
use serde::Deserialize;

/// Name of the single query parameter carrying the search text.
pub const QUERY_PARAM: &str = "q";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<ResultItem>,
}

/// Build the request URI for `text` against `endpoint`.
pub fn search_uri(endpoint: &str, text: &str) -> Result<Uri, TransportError> {
    let separator = match endpoint.find('?') {
        None => "?",
        Some(_) if endpoint.ends_with('?') || endpoint.ends_with('&') => "",
        Some(_) => "&",
    };
    let raw = format!(
        "{endpoint}{separator}{QUERY_PARAM}={}",
        urlencoding::encode(text)
    );
    raw.parse::<Uri>()
        .map_err(|e| TransportError::Protocol(format!("invalid request uri {raw:?}: {e}")))
}

/// Decode a response body into ranked results.
pub fn decode_results(body: &[u8]) -> Result<Vec<ResultItem>, TransportError> {
    serde_json::from_slice::<SearchResponse>(body)
        .map(|response| response.results)
        .map_err(|e| TransportError::Protocol(format!("malformed search response: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
