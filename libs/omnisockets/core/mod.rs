//! Core transport machinery
//!
//! The pieces in dependency order:
//!
//! - [`payload`] / [`event`]: the tagged value model dispatch matches on
//! - [`dispatch`]: fans decoded values out to registered callbacks
//! - [`status`]: atomic connection status cell
//! - [`options`] / [`request`]: per-socket configuration and the immutable
//!   request carrier
//! - [`transport`]: the WebSocket lifecycle state machine driving it all

pub mod dispatch;
pub mod event;
pub mod options;
pub mod payload;
pub mod request;
pub mod status;
pub mod transport;

// Re-export main types
pub use dispatch::{dispatch, Inbound};
pub use event::Event;
pub use options::{Options, OptionsBuilder, ScheduledTask, Scheduler};
pub use payload::{Payload, PayloadKind};
pub use request::{Request, RequestBuilder, RequestFactory, TransportKind};
pub use status::{AtomicStatus, Status};
pub use transport::{Transport, WebSocketTransport};
