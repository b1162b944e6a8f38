use crate::core::request::TransportKind;
use crate::traits::error::OmniSocketError;
use std::collections::HashMap;

/// Decoded domain value delivered to callbacks
///
/// Tagged variants replace runtime-type reflection: a callback declares
/// the [`PayloadKind`] it accepts and dispatch matches on the tag, never
/// on a type lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Raw or identity-decoded text
    Text(String),
    /// Integer-decoded value
    Integer(i64),
    /// JSON-decoded value
    Json(serde_json::Value),
    /// Numeric code of the upgrade response
    Status(u16),
    /// Headers of the upgrade response
    Headers(HashMap<String, Vec<String>>),
    /// Transport identifier of an established channel
    Transport(TransportKind),
    /// Engine-reported failure
    Error(OmniSocketError),
}

/// Type tag of a [`Payload`], the unit of dispatch matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Text,
    Integer,
    Json,
    Status,
    Headers,
    Transport,
    Error,
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Integer(_) => PayloadKind::Integer,
            Payload::Json(_) => PayloadKind::Json,
            Payload::Status(_) => PayloadKind::Status,
            Payload::Headers(_) => PayloadKind::Headers,
            Payload::Transport(_) => PayloadKind::Transport,
            Payload::Error(_) => PayloadKind::Error,
        }
    }

    /// Get the payload as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the payload as an integer, if it is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Payload::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the payload as a status code, if it is one
    pub fn as_status(&self) -> Option<u16> {
        match self {
            Payload::Status(code) => Some(*code),
            _ => None,
        }
    }
}
