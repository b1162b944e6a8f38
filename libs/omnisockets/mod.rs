//! # OmniSockets
//!
//! A client library unifying WebSocket and HTTP-streaming transports behind
//! one real-time socket abstraction: applications register typed callbacks
//! for connection lifecycle and message events and never touch
//! transport-specific code.
//!
//! ## Features
//!
//! - **Tagged-variant dispatch**: callbacks declare the payload kind they
//!   accept; dispatch matches on the tag, no reflection, all matches fire
//! - **Atomic lifecycle state machine**: status, explicit-close and
//!   error-handled flags are lock-free and race-safe against late network
//!   callbacks
//! - **Pluggable decoder chain**: first matching decoder wins, identity
//!   text decoder installed by default
//! - **Injected reconnect scheduler**: delayed retries run on an explicitly
//!   owned timer, never process-wide state
//!
//! ## Example
//!
//! ```rust,ignore
//! use omnisockets::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let engine = Arc::new(TungsteniteEngine::current());
//!     let options = Options::builder(engine.clone(), Arc::new(Scheduler::current()))
//!         .reconnect(true)
//!         .reconnect_delay(Duration::from_secs(5))
//!         .build();
//!
//!     let request = Request::builder("wss://api.example.com/stream").build();
//!     let transport = WebSocketTransport::new(
//!         request.clone().into_factory(),
//!         options,
//!         &request,
//!         vec![
//!             FunctionWrapper::on_open(|| println!("open")),
//!             FunctionWrapper::on_message(|text| println!("got: {text}")),
//!         ],
//!     );
//!
//!     engine.connect(request, transport.clone())?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod traits;

// Re-export all traits
pub use traits::*;

// Re-export core transport functionality
pub use crate::core::{
    dispatch::{dispatch, Inbound},
    event::Event,
    options::{Options, OptionsBuilder, ScheduledTask, Scheduler},
    payload::{Payload, PayloadKind},
    request::{Request, RequestBuilder, RequestFactory, TransportKind},
    status::{AtomicStatus, Status},
    transport::{Transport, WebSocketTransport},
};

// Re-export the shipped engine
pub use engine::TungsteniteEngine;
