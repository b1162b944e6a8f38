use thiserror::Error;

/// Main error type for omnisockets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OmniSocketError {
    /// The server answered the upgrade request with something other than 101
    #[error("protocol upgrade rejected with HTTP status {code}")]
    UpgradeRejected { code: u16 },

    /// The handshake completed without producing a usable channel
    #[error("handshake completed but no channel was established")]
    NoChannel,

    /// Failure reported by the underlying network engine on an open channel
    #[error("channel failure: {0}")]
    Channel(String),

    /// The handshake itself could not be performed
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// The request could not be turned into a connection attempt
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for omnisockets operations
pub type Result<T> = std::result::Result<T, OmniSocketError>;
