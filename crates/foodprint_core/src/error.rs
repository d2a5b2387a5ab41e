//! Failures of a backend call

use thiserror::Error;

/// Transport or parse failure on one of the backend calls.
///
/// Application errors reported by the server inside a JSON body are not
/// represented here; they decode into [`crate::UploadOutcome::Rejected`] or
/// [`crate::ContributionOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response body (network, CORS, DNS).
    #[error("request failed: {0}")]
    Request(String),

    /// The response body is not JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is JSON but lacks the fields the page renders.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
