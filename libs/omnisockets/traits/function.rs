use crate::core::event::Event;
use crate::core::payload::{Payload, PayloadKind};
use crate::core::request::TransportKind;
use crate::traits::error::OmniSocketError;
use std::collections::HashMap;
use std::fmt;

/// A registered callback plus the payload kind it accepts
///
/// Dispatch matches a decoded value against every registered wrapper: the
/// wrapper fires when its declared [`PayloadKind`] equals the value's kind
/// and its scope is either the dispatched event or unset. Registration
/// order is preserved and all matching wrappers are invoked.
pub struct FunctionWrapper {
    kind: PayloadKind,
    scope: Option<Event>,
    callback: Box<dyn Fn(&Payload) + Send + Sync>,
}

impl FunctionWrapper {
    /// Register an unscoped callback: fires for any event whose payload
    /// carries the declared kind
    pub fn new(kind: PayloadKind, callback: impl Fn(&Payload) + Send + Sync + 'static) -> Self {
        Self {
            kind,
            scope: None,
            callback: Box::new(callback),
        }
    }

    /// Register a callback scoped to a single event category
    pub fn scoped(
        event: Event,
        kind: PayloadKind,
        callback: impl Fn(&Payload) + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            scope: Some(event),
            callback: Box::new(callback),
        }
    }

    /// Callback for decoded text payloads of MESSAGE events
    pub fn on_message(callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self::on_text(Event::Message, callback)
    }

    /// Callback for text payloads of an arbitrary event
    pub fn on_text(event: Event, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self::scoped(event, PayloadKind::Text, move |payload| {
            if let Payload::Text(text) = payload {
                callback(text);
            }
        })
    }

    /// Callback for integer payloads of an arbitrary event
    pub fn on_integer(event: Event, callback: impl Fn(i64) + Send + Sync + 'static) -> Self {
        Self::scoped(event, PayloadKind::Integer, move |payload| {
            if let Payload::Integer(value) = payload {
                callback(*value);
            }
        })
    }

    /// Callback for JSON payloads of an arbitrary event
    pub fn on_json(
        event: Event,
        callback: impl Fn(&serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        Self::scoped(event, PayloadKind::Json, move |payload| {
            if let Payload::Json(value) = payload {
                callback(value);
            }
        })
    }

    /// Callback for the numeric code of the upgrade response
    pub fn on_status(callback: impl Fn(u16) + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Status, PayloadKind::Status, move |payload| {
            if let Payload::Status(code) = payload {
                callback(*code);
            }
        })
    }

    /// Callback for the handshake response headers
    pub fn on_headers(
        callback: impl Fn(&HashMap<String, Vec<String>>) + Send + Sync + 'static,
    ) -> Self {
        Self::scoped(Event::Headers, PayloadKind::Headers, move |payload| {
            if let Payload::Headers(headers) = payload {
                callback(headers);
            }
        })
    }

    /// Callback for the transport identifier once a channel is established
    pub fn on_transport(callback: impl Fn(TransportKind) + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Transport, PayloadKind::Transport, move |payload| {
            if let Payload::Transport(kind) = payload {
                callback(*kind);
            }
        })
    }

    /// Callback for channel and handshake errors
    pub fn on_error(callback: impl Fn(&OmniSocketError) + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Error, PayloadKind::Error, move |payload| {
            if let Payload::Error(err) = payload {
                callback(err);
            }
        })
    }

    /// Callback fired on the first successful open of the connection
    pub fn on_open(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Open, PayloadKind::Text, move |_| callback())
    }

    /// Callback fired when the connection re-opens after a drop
    pub fn on_reconnect(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Reconnect, PayloadKind::Text, move |_| callback())
    }

    /// Callback fired when the connection closes
    pub fn on_close(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self::scoped(Event::Close, PayloadKind::Text, move |_| callback())
    }

    /// Declared payload kind of this wrapper
    pub fn payload_kind(&self) -> PayloadKind {
        self.kind
    }

    /// Event scope of this wrapper, if any
    pub fn scope(&self) -> Option<Event> {
        self.scope
    }

    pub(crate) fn accepts(&self, event: Event, kind: PayloadKind) -> bool {
        self.kind == kind && self.scope.map_or(true, |scope| scope == event)
    }

    pub(crate) fn invoke(&self, payload: &Payload) {
        (self.callback)(payload);
    }
}

impl fmt::Debug for FunctionWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionWrapper")
            .field("kind", &self.kind)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Secondary resolution strategy for payloads the decoder chain misses
///
/// The resolver gets one shot after the whole chain has returned `None`
/// for a raw payload. It is carried by the `Request` and shared by all
/// dispatches of a transport.
pub trait FunctionResolver: Send + Sync {
    /// Attempt to resolve a raw payload the decoders could not handle
    fn resolve(&self, event: Event, raw: &str) -> Option<Payload>;
}

/// Default resolver: resolves nothing, undecodable payloads drop silently
pub struct DefaultResolver;

impl FunctionResolver for DefaultResolver {
    fn resolve(&self, _event: Event, _raw: &str) -> Option<Payload> {
        None
    }
}
