//! Background dispatch worker
//!
//! The GUI is immediate-mode and synchronous, so network exchanges run on
//! a dedicated thread owning a current-thread tokio runtime. Queries go in
//! over a std mpsc channel, settled outcomes come back over another, and
//! the UI polls for them once per frame. The controller's readiness gate
//! guarantees the request channel never holds more than one query.

use crate::error::TransportError;
use crate::transport::{Dispatch, QueryResult};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

/// Outcome of one dispatch, as delivered back to the UI thread
pub type DispatchOutcome = Result<QueryResult, TransportError>;

/// Handle to the background dispatch thread
///
/// Dropping the handle closes the request channel and the worker thread
/// exits after settling any in-flight exchange.
pub struct DispatchWorker {
    request_tx: Sender<String>,
    outcome_rx: Receiver<DispatchOutcome>,
}

impl DispatchWorker {
    /// Spawn the worker thread around the given transport
    pub fn spawn<T>(transport: T) -> anyhow::Result<Self>
    where
        T: Dispatch + Send + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        thread::Builder::new()
            .name("dispatch-worker".to_string())
            .spawn(move || {
                // One query at a time; blocking recv keeps the thread idle
                // between dispatches.
                while let Ok(query) = request_rx.recv() {
                    let outcome = runtime.block_on(transport.dispatch(&query));
                    if outcome_tx.send(outcome).is_err() {
                        // UI side is gone
                        break;
                    }
                }
                tracing::debug!("Dispatch worker shutting down");
            })?;

        Ok(Self {
            request_tx,
            outcome_rx,
        })
    }

    /// Hand a query to the worker for dispatch
    pub fn send(&self, query: String) {
        if self.request_tx.send(query).is_err() {
            tracing::error!("Dispatch worker thread is gone; query dropped");
        }
    }

    /// Non-blocking poll for a settled outcome
    pub fn try_recv(&self) -> Option<DispatchOutcome> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::{Duration, Instant};

    struct EchoTransport;

    #[async_trait]
    impl Dispatch for EchoTransport {
        async fn dispatch(&self, query: &str) -> Result<QueryResult, TransportError> {
            Ok(QueryResult {
                destination: "echo".to_string(),
                response: query.to_string(),
            })
        }
    }

    fn wait_for_outcome(worker: &DispatchWorker) -> DispatchOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = worker.try_recv() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "worker never answered");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_worker_round_trip() {
        let worker = DispatchWorker::spawn(EchoTransport).unwrap();
        worker.send("ping".to_string());

        let result = wait_for_outcome(&worker).unwrap();
        assert_eq!(result.destination, "echo");
        assert_eq!(result.response, "ping");
    }

    #[test]
    fn test_worker_serializes_requests() {
        let worker = DispatchWorker::spawn(EchoTransport).unwrap();
        worker.send("one".to_string());
        worker.send("two".to_string());

        let first = wait_for_outcome(&worker).unwrap();
        let second = wait_for_outcome(&worker).unwrap();
        assert_eq!(first.response, "one");
        assert_eq!(second.response, "two");
    }

    #[test]
    fn test_try_recv_empty() {
        let worker = DispatchWorker::spawn(EchoTransport).unwrap();
        assert!(worker.try_recv().is_none());
    }
}
