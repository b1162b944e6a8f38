//! Common test utilities for OmniSockets integration tests
//!
//! This module provides shared mocks for the engine seams and a small
//! in-process WebSocket server for end-to-end tests.

#![allow(dead_code)]

use omnisockets::{
    Channel, EventSink, FunctionWrapper, NetworkEngine, OmniSocketError, Options, Payload,
    PayloadKind, Request, Scheduler, WebSocketTransport,
};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Engine stub that records connection attempts and never produces I/O
pub struct MockEngine {
    attempts: AtomicUsize,
    last_uri: Mutex<Option<String>>,
    fail_submit: bool,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            attempts: AtomicUsize::new(0),
            last_uri: Mutex::new(None),
            fail_submit: false,
        })
    }

    /// Engine whose submissions are always refused
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            attempts: AtomicUsize::new(0),
            last_uri: Mutex::new(None),
            fail_submit: true,
        })
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn last_uri(&self) -> Option<String> {
        self.last_uri.lock().clone()
    }
}

impl NetworkEngine for MockEngine {
    fn connect(
        &self,
        request: Request,
        _sink: Arc<dyn EventSink>,
    ) -> omnisockets::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        *self.last_uri.lock() = Some(request.uri().to_owned());
        if self.fail_submit {
            Err(OmniSocketError::Channel("submission refused".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Channel stub counting close calls
pub struct MockChannel {
    closes: AtomicUsize,
}

impl MockChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            closes: AtomicUsize::new(0),
        })
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Channel for MockChannel {
    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every payload a callback sees, usable across threads
pub struct PayloadLog {
    tx: crossbeam_channel::Sender<Payload>,
    rx: crossbeam_channel::Receiver<Payload>,
}

impl PayloadLog {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Raw sender for hand-rolled recording callbacks
    pub fn tx_clone(&self) -> crossbeam_channel::Sender<Payload> {
        self.tx.clone()
    }

    /// A callback closure that clones payloads into this log
    pub fn sink(&self) -> impl Fn(&Payload) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |payload| {
            let _ = tx.send(payload.clone());
        }
    }

    /// A typed callback recording text payloads
    pub fn sink_text(&self) -> impl Fn(&str) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |text| {
            let _ = tx.send(Payload::Text(text.to_owned()));
        }
    }

    /// A typed callback recording integer payloads
    pub fn sink_integer(&self) -> impl Fn(i64) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |value| {
            let _ = tx.send(Payload::Integer(value));
        }
    }

    /// A typed callback recording JSON payloads
    pub fn sink_json(&self) -> impl Fn(&serde_json::Value) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |value| {
            let _ = tx.send(Payload::Json(value.clone()));
        }
    }

    /// A typed callback recording upgrade status codes
    pub fn sink_status(&self) -> impl Fn(u16) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |code| {
            let _ = tx.send(Payload::Status(code));
        }
    }

    /// A wrapper recording payloads of `kind` for `event`
    pub fn wrapper(&self, event: omnisockets::Event, kind: PayloadKind) -> FunctionWrapper {
        FunctionWrapper::scoped(event, kind, self.sink())
    }

    pub fn drain(&self) -> Vec<Payload> {
        self.rx.try_iter().collect()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Payload> {
        self.rx.recv_timeout(timeout).ok()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }
}

/// Build a transport wired to the given engine
///
/// Must run inside a tokio runtime (the scheduler grabs the current handle).
pub fn make_transport(
    engine: Arc<dyn NetworkEngine>,
    reconnect: bool,
    delay: Duration,
    functions: Vec<FunctionWrapper>,
) -> Arc<WebSocketTransport> {
    let request = Request::builder("ws://127.0.0.1:9/socket").build();
    transport_for_request(engine, reconnect, delay, request, functions)
}

pub fn transport_for_request(
    engine: Arc<dyn NetworkEngine>,
    reconnect: bool,
    delay: Duration,
    request: Request,
    functions: Vec<FunctionWrapper>,
) -> Arc<WebSocketTransport> {
    let options = Options::builder(engine, Arc::new(Scheduler::current()))
        .reconnect(reconnect)
        .reconnect_delay(delay)
        .build();
    WebSocketTransport::new(request.clone().into_factory(), options, &request, functions)
}

/// What the mock server does with an accepted websocket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBehavior {
    /// Send a greeting, then echo every text message
    GreetAndEcho,
    /// Send a greeting, then close the connection immediately
    CloseAfterGreeting,
}

pub const SERVER_GREETING: &str = "hello from server";

/// A simple mock WebSocket server for testing
pub struct MockWsServer {
    pub addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    /// Create and start a new mock WebSocket server
    pub async fn start(behavior: ServerBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let shutdown_clone = shutdown.clone();
        let connections = Arc::new(AtomicUsize::new(0));
        let connections_clone = connections.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                connections_clone.fetch_add(1, Ordering::SeqCst);
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, behavior).await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = shutdown_clone.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            connections,
            shutdown,
        }
    }

    async fn handle_connection(stream: tokio::net::TcpStream, behavior: ServerBehavior) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::accept_async;
        use tokio_tungstenite::tungstenite::Message;

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        if write
            .send(Message::Text(SERVER_GREETING.to_string()))
            .await
            .is_err()
        {
            return;
        }

        if behavior == ServerBehavior::CloseAfterGreeting {
            let _ = write.send(Message::Close(None)).await;
            return;
        }

        while let Some(msg) = read.next().await {
            match msg {
                Ok(msg) if msg.is_text() => {
                    if write.send(msg).await.is_err() {
                        break;
                    }
                }
                Ok(msg) if msg.is_close() => break,
                Ok(_) => {}
                Err(_) => break,
            }
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Number of websocket connections accepted so far
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Raw TCP server answering every request with a fixed non-101 status line
///
/// Lets tests exercise the rejected-upgrade path end to end.
pub async fn start_raw_status_server(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nx-mock-server: reject\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.flush().await;
            });
        }
    });

    addr
}
