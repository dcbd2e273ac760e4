//! Agentic Router Client Library
//!
//! A minimal client for an "agentic router" service: the user submits a
//! free-text query, the remote router picks the backend that answers it,
//! and the client shows which source answered and what the answer was.
//!
//! The behavioral core is the query-dispatch lifecycle in [`controller`]
//! and the single HTTP contract in [`transport`]; everything else is
//! presentation. This library exposes modules for testing and external
//! use; the GUI binary is in `src/main.rs`.

pub mod config;
/// Query-dispatch lifecycle state machine
///
/// Governs a single in-flight query: idle → pending → succeeded/failed.
pub mod controller;
pub mod error;
pub mod transport;
pub mod ui;
pub mod worker;
