//! # OmniSockets Traits
//!
//! Core traits and types for the OmniSockets client library.
//!
//! This module provides the fundamental abstractions used throughout
//! the crate:
//!
//! - **Decoder**: Convert raw inbound payloads into domain values
//! - **FunctionWrapper**: A registered callback plus its accepted payload kind
//! - **FunctionResolver**: Secondary resolution when the decoder chain misses
//! - **NetworkEngine / Channel / EventSink**: Seams towards the async I/O engine
//!
//! ## Example
//!
//! ```rust,ignore
//! use omnisockets::*;
//!
//! let wrapper = FunctionWrapper::on_message(|text| {
//!     println!("got: {text}");
//! });
//! transport.register_function(wrapper);
//! ```

pub mod decoder;
pub mod engine;
pub mod error;
pub mod function;

// Re-export commonly used types
pub use decoder::{Decoder, IdentityDecoder, IntegerDecoder, JsonDecoder};
pub use engine::{Channel, EventSink, NetworkEngine};
pub use error::{OmniSocketError, Result};
pub use function::{DefaultResolver, FunctionResolver, FunctionWrapper};
