//! Error types for the router client
//!
//! The dispatch contract knows a single error kind: `TransportError`.
//! The variants exist for diagnostics only; callers treat them uniformly.

use thiserror::Error;

/// Failure of a single dispatch exchange with the agentic router
///
/// Produced exclusively by the query transport. Covers connectivity
/// failure, non-success HTTP status, and response decoding failure.
/// No retry is performed; a failure is surfaced immediately.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP exchange could not complete (connection refused, timeout,
    /// request build failure)
    #[error("request to router failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The router answered with a non-2xx status
    #[error("router returned error status {status}: {body}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// The response body was not a well-formed `QueryResult`
    ///
    /// This includes a body that parses as JSON but is missing the
    /// `destination` or `response` field; the shape is validated rather
    /// than propagating absent values silently.
    #[error("failed to decode router response: {0}")]
    Decode(#[from] serde_json::Error),
}
