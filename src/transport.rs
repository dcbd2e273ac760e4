//! Query transport
//!
//! Direct HTTP client for the agentic router's `/ask` endpoint.
//! Performs exactly one network exchange per call and holds no state
//! beyond the pooled connection client. Retry, queueing and lifecycle
//! concerns live in the controller, not here.

use crate::config::RouterConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for `POST /ask`
#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    query: &'a str,
}

/// The answer to one submitted query
///
/// `destination` names the backend/tool the router selected (opaque to
/// the client); `response` is the answer text. Both fields are required:
/// a response body missing either fails decoding instead of surfacing
/// absent values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Identifier of the backend/tool that produced the answer
    pub destination: String,
    /// The answer text
    pub response: String,
}

/// Seam between the controller and the concrete transport
///
/// The controller sequences dispatches through this trait only, so it can
/// be unit-tested against an in-process fake without any network.
#[async_trait]
pub trait Dispatch {
    /// Perform one dispatch exchange for `query`
    ///
    /// `query` is a caller-validated non-empty string; implementations do
    /// not re-validate it.
    async fn dispatch(&self, query: &str) -> Result<QueryResult, TransportError>;
}

/// HTTP client for the agentic router
///
/// Wraps a shared `reqwest::Client` (connection pooling) and the base URL
/// fixed at construction time.
#[derive(Debug, Clone)]
pub struct RouterClient {
    client: reqwest::Client,
    base_url: String,
}

impl RouterClient {
    /// Create a client for the router at `config.base_url`
    ///
    /// The request timeout from the config is applied to the underlying
    /// HTTP client; a timed-out dispatch surfaces as `TransportError`.
    pub fn new(config: &RouterConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn ask(&self, query: &str) -> Result<QueryResult, TransportError> {
        let url = format!("{}/ask", self.base_url);

        tracing::debug!(url = %url, query_len = query.len(), "Dispatching query to router");

        let response = self
            .client
            .post(&url)
            .json(&AskRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "Router returned error status"
            );

            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let result: QueryResult = serde_json::from_str(&body)?;

        tracing::debug!(
            destination = %result.destination,
            response_len = result.response.len(),
            "Received answer from router"
        );

        Ok(result)
    }
}

#[async_trait]
impl Dispatch for RouterClient {
    async fn dispatch(&self, query: &str) -> Result<QueryResult, TransportError> {
        self.ask(query).await
    }
}
