//! Core types for scout-core.
//!
//! This module defines the data structures shared by the controller, the
//! transports and the renderer: the ranked [`ResultItem`], the immutable
//! [`SearchRequest`] created on every submission, the [`SearchOutcome`] a
//! transport settles with, and the visible [`Status`].

use crate::error::TransportError;
use serde::{Deserialize, Serialize};

/// A submission counter value. Strictly increasing per effective submission.
pub type Generation = u64;

/// One ranked hit returned by the search service.
///
/// `score` is opaque to scout: it is never validated and results are never
/// re-sorted. Display order is the order the service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub url: String,
    pub score: f64,
}

impl ResultItem {
    pub fn new(url: impl Into<String>, score: f64) -> Self {
        Self { url: url.into(), score }
    }

    /// Score rendered with four decimal places, e.g. `0.9321`.
    pub fn score_label(&self) -> String {
        format!("{:.4}", self.score)
    }
}

/// A search submission, captured at the moment `submit()` accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: Generation,
    pub text: String,
}

/// How a dispatched request settled.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(Vec<ResultItem>),
    Failure(TransportError),
}

impl From<Result<Vec<ResultItem>, TransportError>> for SearchOutcome {
    fn from(result: Result<Vec<ResultItem>, TransportError>) -> Self {
        match result {
            Ok(results) => SearchOutcome::Success(results),
            Err(err) => SearchOutcome::Failure(err),
        }
    }
}

/// An outcome tagged with the generation of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub generation: Generation,
    pub outcome: SearchOutcome,
}

/// Visible lifecycle status of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Loading => write!(f, "loading"),
            Status::Success => write!(f, "success"),
            Status::Error => write!(f, "error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_label_has_four_decimals() {
        assert_eq!(ResultItem::new("https://a.example", 0.9321).score_label(), "0.9321");
        assert_eq!(ResultItem::new("https://b.example", 1.0).score_label(), "1.0000");
        assert_eq!(ResultItem::new("https://c.example", 0.123456).score_label(), "0.1235");
    }

    #[test]
    fn outcome_from_result() {
        let ok: SearchOutcome = Ok(vec![ResultItem::new("u", 0.5)]).into();
        assert_eq!(ok, SearchOutcome::Success(vec![ResultItem::new("u", 0.5)]));

        let err: SearchOutcome = Err(TransportError::Network("refused".into())).into();
        assert!(matches!(err, SearchOutcome::Failure(TransportError::Network(_))));
    }
}
