use crate::traits::decoder::{Decoder, IdentityDecoder};
use crate::traits::function::{DefaultResolver, FunctionResolver};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifier of the transport mechanism a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    WebSocket,
    Sse,
    Streaming,
    LongPolling,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::WebSocket => "WEBSOCKET",
            TransportKind::Sse => "SSE",
            TransportKind::Streaming => "STREAMING",
            TransportKind::LongPolling => "LONG-POLLING",
        };
        f.write_str(name)
    }
}

/// Factory producing a fresh request for every connection attempt
///
/// Explicitly supplied by the caller; the transport invokes it on each
/// reconnect instead of reusing a stale request.
pub type RequestFactory = Arc<dyn Fn() -> Request + Send + Sync>;

/// Immutable description of one connection attempt
///
/// Carries the decoder chain, the dispatch resolver and the transport
/// kind. Built once via [`Request::builder`] and never mutated.
#[derive(Clone)]
pub struct Request {
    uri: String,
    kind: TransportKind,
    headers: HashMap<String, String>,
    decoders: Vec<Arc<dyn Decoder>>,
    resolver: Arc<dyn FunctionResolver>,
}

impl Request {
    pub fn builder(uri: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(uri)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Extra headers to send with the upgrade request
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn decoders(&self) -> &[Arc<dyn Decoder>] {
        &self.decoders
    }

    pub fn resolver(&self) -> &Arc<dyn FunctionResolver> {
        &self.resolver
    }

    /// Turn this request into a factory that clones it per attempt
    pub fn into_factory(self) -> RequestFactory {
        Arc::new(move || self.clone())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("uri", &self.uri)
            .field("kind", &self.kind)
            .field("headers", &self.headers.len())
            .field("decoders", &self.decoders.len())
            .finish_non_exhaustive()
    }
}

/// Consuming builder for [`Request`]
pub struct RequestBuilder {
    uri: String,
    kind: TransportKind,
    headers: HashMap<String, String>,
    decoders: Vec<Arc<dyn Decoder>>,
    resolver: Arc<dyn FunctionResolver>,
}

impl RequestBuilder {
    fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            kind: TransportKind::WebSocket,
            headers: HashMap::new(),
            decoders: Vec::new(),
            resolver: Arc::new(DefaultResolver),
        }
    }

    pub fn transport(mut self, kind: TransportKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Append a decoder to the chain; order is registration order
    pub fn decoder(mut self, decoder: impl Decoder + 'static) -> Self {
        self.decoders.push(Arc::new(decoder));
        self
    }

    pub fn resolver(mut self, resolver: impl FunctionResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn build(mut self) -> Request {
        // The chain must never be empty.
        if self.decoders.is_empty() {
            self.decoders.push(Arc::new(IdentityDecoder));
        }
        Request {
            uri: self.uri,
            kind: self.kind,
            headers: self.headers,
            decoders: self.decoders,
            resolver: self.resolver,
        }
    }
}
