//! Network engine backed by tokio-tungstenite
//!
//! The engine owns the actual socket I/O; the transport only sees the
//! [`EventSink`] callbacks. `connect` spawns the connection task on the
//! injected runtime handle and returns immediately.

use crate::core::request::Request;
use crate::traits::engine::{Channel, EventSink, NetworkEngine};
use crate::traits::error::{OmniSocketError, Result};
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{self, http, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

/// tokio-tungstenite rendition of [`NetworkEngine`]
pub struct TungsteniteEngine {
    handle: Handle,
}

impl TungsteniteEngine {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Engine on the runtime of the calling task
    ///
    /// # Panics
    /// Panics outside a tokio runtime context, like `Handle::current`.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl NetworkEngine for TungsteniteEngine {
    fn connect(&self, request: Request, sink: Arc<dyn EventSink>) -> Result<()> {
        self.handle.spawn(run_connection(request, sink));
        Ok(())
    }
}

async fn run_connection(request: Request, sink: Arc<dyn EventSink>) {
    let mut upgrade = match request.uri().into_client_request() {
        Ok(upgrade) => upgrade,
        Err(e) => {
            sink.on_error(OmniSocketError::InvalidRequest(e.to_string()));
            return;
        }
    };

    for (key, value) in request.headers() {
        match key.parse::<http::header::HeaderName>() {
            Ok(name) => match value.parse::<http::header::HeaderValue>() {
                Ok(value) => {
                    upgrade.headers_mut().insert(name, value);
                }
                Err(_) => {
                    warn!("Invalid header value for key '{}': {}", key, value);
                }
            },
            Err(_) => {
                warn!("Invalid header name: {}", key);
            }
        }
    }

    match connect_async(upgrade).await {
        Ok((stream, response)) => {
            let code = response.status().as_u16();
            if let Err(err) = sink.on_connect_result(code) {
                sink.on_error(err);
                return;
            }
            sink.on_headers(header_map(response.headers()));
            run_channel(stream, sink).await;
        }
        Err(tungstenite::Error::Http(response)) => {
            // Upgrade rejected; applications still observe the status line
            // and headers through their callbacks before the error fires.
            let code = response.status().as_u16();
            let headers = header_map(response.headers());
            let result = sink.on_connect_result(code);
            sink.on_headers(headers);
            if let Err(err) = result {
                sink.on_error(err);
            }
        }
        Err(e) => {
            sink.on_error(OmniSocketError::Handshake(e.to_string()));
        }
    }
}

async fn run_channel(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    sink: Arc<dyn EventSink>,
) {
    let (mut write, mut read) = stream.split();
    let (close_tx, mut close_rx) = mpsc::unbounded_channel::<()>();

    // The writer half lives in its own task so `Channel::close` stays
    // synchronous and callable from any thread.
    let writer = tokio::spawn(async move {
        let _ = close_rx.recv().await;
        let _ = write.close().await;
    });

    let channel: Arc<dyn Channel> = Arc::new(WsChannel {
        closed: AtomicBool::new(false),
        close_tx,
    });
    sink.on_channel_established(Some(channel));
    sink.on_open();

    while let Some(frame) = read.next().await {
        match frame {
            Ok(Message::Text(text)) => sink.on_message(&text),
            Ok(Message::Close(_)) => break,
            // Binary and control frames are not part of the text transport.
            Ok(_) => {}
            Err(e) => {
                sink.on_error(OmniSocketError::Channel(e.to_string()));
                break;
            }
        }
    }

    debug!("websocket stream ended");
    sink.on_close();
    writer.abort();
}

fn header_map(headers: &http::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

/// Close handle over the writer half of a websocket stream
struct WsChannel {
    closed: AtomicBool,
    close_tx: mpsc::UnboundedSender<()>,
}

impl Channel for WsChannel {
    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = self.close_tx.send(());
    }
}
