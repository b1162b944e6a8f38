//! WebSocket transport state machine
//!
//! One `WebSocketTransport` manages one logical connection: it receives
//! raw lifecycle callbacks from the network engine, decodes payloads
//! through the request's decoder chain, fans them out to registered
//! callbacks and applies the reconnect policy on unplanned closes.
//!
//! The instance is reused across reconnects — same callbacks, same
//! identity, only the underlying channel is replaced.

use crate::core::dispatch::{dispatch, Inbound};
use crate::core::event::Event;
use crate::core::options::{Options, ScheduledTask};
use crate::core::payload::Payload;
use crate::core::request::{Request, RequestFactory, TransportKind};
use crate::core::status::{AtomicStatus, Status};
use crate::traits::decoder::{Decoder, IdentityDecoder};
use crate::traits::engine::{Channel, EventSink};
use crate::traits::error::{OmniSocketError, Result};
use crate::traits::function::{FunctionResolver, FunctionWrapper};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, error, warn};

/// The only upgrade response code that establishes a channel.
const SWITCHING_PROTOCOLS: u16 = 101;

/// Application-facing surface of one logical connection
pub trait Transport: EventSink {
    /// Current connection status
    fn status(&self) -> Status;

    /// Whether the last dispatched error reached at least one callback
    fn error_handled(&self) -> bool;

    /// Close the connection; idempotent and safe under concurrent calls
    fn close(&self);

    /// Register an additional callback; registration order is preserved
    fn register_function(&self, function: FunctionWrapper);

    /// Transport identifier
    fn kind(&self) -> TransportKind;
}

/// WebSocket rendition of [`Transport`]
///
/// Lifecycle callbacks arrive on engine worker threads concurrently with
/// application threads calling [`Transport::close`]; the shared state
/// (status, explicit-close flag, error-handled flag) is atomic and the
/// races between a late `on_open`/`on_close` and an explicit close are
/// resolved by idempotent guards, never by raising.
pub struct WebSocketTransport {
    factory: RequestFactory,
    options: Options,
    decoders: Vec<Arc<dyn Decoder>>,
    resolver: Arc<dyn FunctionResolver>,
    functions: RwLock<Vec<Arc<FunctionWrapper>>>,
    status: AtomicStatus,
    /// Set once by an explicit `close()`; terminal.
    closed: AtomicBool,
    error_handled: AtomicBool,
    channel: Mutex<Option<Arc<dyn Channel>>>,
    pending_reconnect: Mutex<Option<ScheduledTask>>,
    weak_self: Weak<WebSocketTransport>,
}

impl WebSocketTransport {
    /// Create a transport for one logical connection
    ///
    /// `factory` produces the request re-issued on every reconnect;
    /// `request` supplies the decoder chain and resolver. An identity
    /// decoder is installed when the request carries no decoders.
    pub fn new(
        factory: RequestFactory,
        options: Options,
        request: &Request,
        functions: Vec<FunctionWrapper>,
    ) -> Arc<Self> {
        let mut decoders = request.decoders().to_vec();
        if decoders.is_empty() {
            decoders.push(Arc::new(IdentityDecoder) as Arc<dyn Decoder>);
        }

        Arc::new_cyclic(|weak| Self {
            factory,
            options,
            decoders,
            resolver: Arc::clone(request.resolver()),
            functions: RwLock::new(functions.into_iter().map(Arc::new).collect()),
            status: AtomicStatus::new(Status::Init),
            closed: AtomicBool::new(false),
            error_handled: AtomicBool::new(false),
            channel: Mutex::new(None),
            pending_reconnect: Mutex::new(None),
            weak_self: weak.clone(),
        })
    }

    /// Re-issue the original request with this transport as the sink
    ///
    /// A submission failure is logged once; there is no recursive retry.
    fn reconnect(&self) {
        let Some(me) = self.weak_self.upgrade() else {
            return;
        };
        let request = (self.factory)();
        debug!(uri = request.uri(), "re-issuing request after close");
        let sink: Arc<dyn EventSink> = me;
        if let Err(err) = self.options.runtime().connect(request, sink) {
            error!(%err, "reconnect attempt could not be submitted");
        }
    }

    fn dispatch(&self, event: Event, inbound: Inbound<'_>) -> bool {
        // Snapshot the registry so callbacks can register further
        // functions without deadlocking on the write lock.
        let functions = self.functions.read().clone();
        dispatch(
            event,
            &self.decoders,
            &functions,
            inbound,
            self.resolver.as_ref(),
        )
    }
}

impl EventSink for WebSocketTransport {
    fn on_connect_result(&self, code: u16) -> Result<()> {
        self.dispatch(Event::Status, Inbound::Value(Payload::Status(code)));

        if code == SWITCHING_PROTOCOLS {
            Ok(())
        } else {
            self.status.set(Status::Error);
            Err(OmniSocketError::UpgradeRejected { code })
        }
    }

    fn on_headers(&self, headers: HashMap<String, Vec<String>>) {
        self.dispatch(Event::Headers, Inbound::Value(Payload::Headers(headers)));
    }

    fn on_channel_established(&self, channel: Option<Arc<dyn Channel>>) {
        // A handshake that yields no channel marks the transport failed
        // without notifying any callback.
        let Some(channel) = channel else {
            self.status.set(Status::Error);
            return;
        };

        *self.channel.lock() = Some(channel);
        self.dispatch(
            Event::Transport,
            Inbound::Value(Payload::Transport(self.kind())),
        );
    }

    fn on_open(&self) {
        // Could have been closed during the handshake.
        if self.status.get() == Status::Close {
            return;
        }

        let reconnect = self.status.get() != Status::Init;
        self.status.set(Status::Open);

        let event = if reconnect { Event::Reconnect } else { Event::Open };
        self.dispatch(
            event,
            Inbound::Value(Payload::Text(Event::Open.name().to_owned())),
        );
    }

    fn on_message(&self, raw: &str) {
        let message = raw.trim();
        if message.is_empty() {
            return;
        }
        self.dispatch(Event::Message, Inbound::Raw(message));
    }

    fn on_close(&self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }

        // Init rather than Close so a reconnect can reopen this transport.
        self.status.set(Status::Init);
        self.dispatch(
            Event::Close,
            Inbound::Value(Payload::Text(Event::Close.name().to_owned())),
        );

        if !self.options.reconnect() {
            self.status.set(Status::Close);
            return;
        }

        let delay = self.options.reconnect_delay();
        if delay.is_zero() {
            self.reconnect();
        } else if let Some(me) = self.weak_self.upgrade() {
            let task = self.options.scheduler().schedule(delay, move || {
                // A close() may have landed while the task was pending.
                if !me.closed.load(Ordering::Acquire) {
                    me.reconnect();
                }
            });
            *self.pending_reconnect.lock() = Some(task);
        }
    }

    fn on_error(&self, err: OmniSocketError) {
        self.status.set(Status::Error);

        let handled = self.dispatch(Event::Error, Inbound::Value(Payload::Error(err.clone())));
        self.error_handled.store(handled, Ordering::Release);

        if !handled {
            warn!(%err, "channel error reached no registered callback");
        }
    }
}

impl Transport for WebSocketTransport {
    fn status(&self) -> Status {
        self.status.get()
    }

    fn error_handled(&self) -> bool {
        self.error_handled.load(Ordering::Acquire)
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        if let Some(task) = self.pending_reconnect.lock().take() {
            task.cancel();
        }

        self.status.set(Status::Close);
        self.dispatch(
            Event::Close,
            Inbound::Value(Payload::Text(Event::Close.name().to_owned())),
        );

        if let Some(channel) = self.channel.lock().take() {
            channel.close();
        }
    }

    fn register_function(&self, function: FunctionWrapper) {
        self.functions.write().push(Arc::new(function));
    }

    fn kind(&self) -> TransportKind {
        TransportKind::WebSocket
    }
}
