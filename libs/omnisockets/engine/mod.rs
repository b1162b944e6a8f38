//! Concrete network engines
//!
//! The transport core is engine-agnostic; anything implementing
//! [`crate::traits::NetworkEngine`] can drive it. This module ships the
//! tokio-tungstenite engine used in production.

pub mod tungstenite;

pub use tungstenite::TungsteniteEngine;
