//! Query lifecycle controller
//!
//! Owns the state of the single dispatch slot (current input text,
//! in-flight flag, last result) and sequences exactly one dispatch at a
//! time. The presentation layer only reads snapshots and issues submit
//! intents; all mutation happens here.

use crate::error::TransportError;
use crate::transport::{Dispatch, QueryResult};

/// Lifecycle state of the dispatch slot
///
/// Exactly one `DispatchState` is live at any time; the readiness gate
/// prevents a second dispatch from entering flight while one is Pending.
#[derive(Debug)]
pub enum DispatchState {
    /// No query in flight, nothing dispatched yet
    Idle,
    /// A dispatch is in flight for the contained query
    Pending {
        /// The query string as it was at submit time
        query: String,
    },
    /// The last dispatch completed with an answer
    Succeeded(QueryResult),
    /// The last dispatch failed
    Failed(TransportError),
}

impl DispatchState {
    /// Whether a dispatch is currently in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, DispatchState::Pending { .. })
    }
}

/// Sequences dispatches against a [`Dispatch`] transport
///
/// The controller knows nothing about URLs or serialization; it drives
/// the transport through the trait and exposes a consistent view of the
/// lifecycle for rendering. There is no terminal state: the machine
/// cycles between Idle/Succeeded/Failed and Pending for the life of the
/// session.
#[derive(Debug)]
pub struct QueryController {
    /// Current input text, replaced on every edit
    input: String,
    /// Live lifecycle state
    state: DispatchState,
    /// Most recent successful result, retained across later failures so
    /// the displayed answer is never replaced by an error
    last_result: Option<QueryResult>,
}

impl Default for QueryController {
    fn default() -> Self {
        Self {
            input: String::new(),
            state: DispatchState::Idle,
            last_result: None,
        }
    }
}

impl QueryController {
    /// Create a controller in the Idle state with empty input
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Mutable handle to the input text, for binding to a text editor
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    /// Replace the input text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether a dispatch is currently in flight
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Readiness gate: submit is permitted only when no dispatch is in
    /// flight and the raw input string is non-empty
    ///
    /// Emptiness is checked without trimming; a whitespace-only input
    /// passes the gate and is sent verbatim.
    pub fn ready(&self) -> bool {
        !self.is_pending() && !self.input.is_empty()
    }

    /// Apply the readiness gate and enter Pending
    ///
    /// Returns the query to be dispatched (a copy of the input at this
    /// moment), or `None` if the gate rejected the submit. This is the
    /// split-phase path for callers that run the transport on another
    /// thread; [`QueryController::submit`] wraps it for in-process use.
    pub fn start_dispatch(&mut self) -> Option<String> {
        if !self.ready() {
            return None;
        }
        let query = self.input.clone();
        tracing::debug!(query_len = query.len(), "Dispatch started");
        self.state = DispatchState::Pending {
            query: query.clone(),
        };
        Some(query)
    }

    /// Settle the in-flight dispatch with the transport's outcome
    ///
    /// Pending → Succeeded on `Ok`, Pending → Failed on `Err`. On failure
    /// the previously displayed result is left unchanged. An outcome
    /// arriving while no dispatch is pending is ignored.
    pub fn finish_dispatch(&mut self, outcome: Result<QueryResult, TransportError>) {
        if !self.is_pending() {
            tracing::warn!("Dispatch outcome arrived while not pending; ignored");
            return;
        }
        match outcome {
            Ok(result) => {
                tracing::info!(destination = %result.destination, "Dispatch succeeded");
                self.last_result = Some(result.clone());
                self.state = DispatchState::Succeeded(result);
            }
            Err(err) => {
                tracing::error!(error = %err, "Dispatch failed");
                self.state = DispatchState::Failed(err);
            }
        }
    }

    /// Run one full dispatch cycle: gate, Pending, await, settle
    ///
    /// Returns `true` if a dispatch was started, `false` if the readiness
    /// gate rejected the submit. Holding `&mut self` across the await
    /// makes a second overlapping submit impossible by construction.
    pub async fn submit<T: Dispatch + ?Sized>(&mut self, transport: &T) -> bool {
        let Some(query) = self.start_dispatch() else {
            return false;
        };
        let outcome = transport.dispatch(&query).await;
        self.finish_dispatch(outcome);
        true
    }

    /// The live lifecycle state
    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// The most recent successful result, if any
    ///
    /// Survives later failures: after Pending → Failed the previous
    /// answer stays displayed next to the error.
    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    /// The error of the last dispatch, if the machine is in Failed
    pub fn last_error(&self) -> Option<&TransportError> {
        match &self.state {
            DispatchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-process transport double: records every query it is handed and
    /// answers from a fixed script.
    struct FakeTransport {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl FakeTransport {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::succeeding()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Dispatch for FakeTransport {
        async fn dispatch(&self, query: &str) -> Result<QueryResult, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail {
                Err(TransportError::Status {
                    status: 503,
                    body: "connection refused".to_string(),
                })
            } else {
                Ok(QueryResult {
                    destination: "sql-db".to_string(),
                    response: "42 rows".to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_submit_invokes_transport_with_exact_input() {
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();
        controller.set_input("how many users signed up?");

        assert!(controller.submit(&transport).await);
        assert_eq!(transport.call_count(), 1);
        assert_eq!(
            transport.seen.lock().unwrap().as_slice(),
            ["how many users signed up?"]
        );
    }

    #[tokio::test]
    async fn test_success_exposes_result_fields() {
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();
        controller.set_input("count rows");

        controller.submit(&transport).await;

        match controller.state() {
            DispatchState::Succeeded(result) => {
                assert_eq!(result.destination, "sql-db");
                assert_eq!(result.response, "42 rows");
            }
            other => panic!("expected Succeeded, got {:?}", other),
        }
        assert_eq!(controller.last_result().unwrap().destination, "sql-db");
    }

    #[tokio::test]
    async fn test_empty_input_is_noop() {
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();

        assert!(!controller.ready());
        assert!(!controller.submit(&transport).await);
        assert_eq!(transport.call_count(), 0);
        assert!(matches!(controller.state(), DispatchState::Idle));

        // Still a no-op after a completed dispatch
        controller.set_input("q");
        controller.submit(&transport).await;
        controller.set_input("");
        assert!(!controller.submit(&transport).await);
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_while_pending_is_noop() {
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();
        controller.set_input("first");

        // Enter Pending through the split-phase path and hold it there.
        assert!(controller.start_dispatch().is_some());
        assert!(controller.is_pending());

        // The gate rejects everything while in flight.
        assert!(!controller.ready());
        assert!(controller.start_dispatch().is_none());
        assert!(!controller.submit(&transport).await);
        assert_eq!(transport.call_count(), 0);
        assert!(controller.is_pending());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let ok = FakeTransport::succeeding();
        let broken = FakeTransport::failing();
        let mut controller = QueryController::new();

        controller.set_input("first question");
        controller.submit(&ok).await;
        assert_eq!(controller.last_result().unwrap().response, "42 rows");

        controller.set_input("second question");
        controller.submit(&broken).await;

        assert!(matches!(controller.state(), DispatchState::Failed(_)));
        assert!(controller.last_error().is_some());
        // The previously displayed answer is untouched.
        assert_eq!(controller.last_result().unwrap().response, "42 rows");
    }

    #[tokio::test]
    async fn test_failure_is_recoverable_by_next_submit() {
        let broken = FakeTransport::failing();
        let ok = FakeTransport::succeeding();
        let mut controller = QueryController::new();

        controller.set_input("q");
        controller.submit(&broken).await;
        assert!(matches!(controller.state(), DispatchState::Failed(_)));

        // Failed → Pending → Succeeded on the next valid submit.
        assert!(controller.submit(&ok).await);
        assert!(matches!(controller.state(), DispatchState::Succeeded(_)));
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_rapid_resubmission_is_sequential() {
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();
        controller.set_input("again and again");

        for _ in 0..5 {
            assert!(controller.submit(&transport).await);
        }
        // One transport call per completed cycle, never an overlap.
        assert_eq!(transport.call_count(), 5);
    }

    #[tokio::test]
    async fn test_whitespace_only_input_passes_gate_verbatim() {
        // Emptiness is checked on the raw string: " " is non-empty and
        // is dispatched exactly as typed.
        let transport = FakeTransport::succeeding();
        let mut controller = QueryController::new();
        controller.set_input(" ");

        assert!(controller.ready());
        assert!(controller.submit(&transport).await);
        assert_eq!(transport.seen.lock().unwrap().as_slice(), [" "]);
    }

    #[test]
    fn test_outcome_without_pending_is_ignored() {
        let mut controller = QueryController::new();
        controller.finish_dispatch(Ok(QueryResult {
            destination: "milvus".to_string(),
            response: "ghost answer".to_string(),
        }));
        assert!(matches!(controller.state(), DispatchState::Idle));
        assert!(controller.last_result().is_none());
    }

    #[test]
    fn test_input_edits_do_not_disturb_pending() {
        let mut controller = QueryController::new();
        controller.set_input("original");
        controller.start_dispatch();

        // The user keeps typing while the dispatch is in flight.
        controller.input_mut().push_str(" plus edits");

        match controller.state() {
            DispatchState::Pending { query } => assert_eq!(query, "original"),
            other => panic!("expected Pending, got {:?}", other),
        }
    }
}
