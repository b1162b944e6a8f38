use crate::core::request::Request;
use crate::traits::error::{OmniSocketError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Close side of an established network channel
///
/// `close` must be idempotent: the transport may call it concurrently with
/// the engine tearing the channel down on its own.
pub trait Channel: Send + Sync {
    fn close(&self);
}

/// Receiver of raw lifecycle callbacks from the network engine
///
/// The engine delivers these on its own worker threads or tasks,
/// concurrently with application threads calling `Transport::close`. The
/// expected sequence for a successful attempt is:
///
/// ```text
/// on_connect_result(101) -> on_headers -> on_channel_established
///     -> on_open -> on_message* -> on_close
/// ```
///
/// Failed attempts route through `on_error` instead; `on_close` fires at
/// most once per channel.
pub trait EventSink: Send + Sync {
    /// HTTP status code of the upgrade response
    ///
    /// Returns `Err(UpgradeRejected)` for anything but 101; the engine
    /// must then abort the attempt and feed the error to [`on_error`]
    /// so applications observe the failure on their error callbacks.
    ///
    /// [`on_error`]: EventSink::on_error
    fn on_connect_result(&self, code: u16) -> Result<()>;

    /// Headers of the upgrade response
    fn on_headers(&self, headers: HashMap<String, Vec<String>>);

    /// The handshake finished; `None` means no usable channel was produced
    fn on_channel_established(&self, channel: Option<Arc<dyn Channel>>);

    /// The logical connection is open
    fn on_open(&self);

    /// A text payload arrived on the channel
    fn on_message(&self, raw: &str);

    /// The channel closed without the application asking for it
    fn on_close(&self);

    /// The engine reported a failure for this attempt or channel
    fn on_error(&self, err: OmniSocketError);
}

/// Pre-built async engine performing the actual socket I/O
///
/// `connect` submits a connection attempt and returns once the engine has
/// accepted it; lifecycle callbacks arrive on the sink asynchronously. An
/// `Err` means the attempt could not even be submitted.
pub trait NetworkEngine: Send + Sync {
    fn connect(&self, request: Request, sink: Arc<dyn EventSink>) -> Result<()>;
}
