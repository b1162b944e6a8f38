use std::fmt;

/// Dispatch category tag for lifecycle and message callbacks
///
/// Every dispatch carries exactly one event; callbacks scoped to an event
/// only fire for that category, unscoped callbacks fire for any category
/// whose payload kind matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// First successful open of the connection
    Open,
    /// The connection re-opened after a drop
    Reconnect,
    /// A decoded inbound payload
    Message,
    /// An engine-reported failure
    Error,
    /// The connection closed
    Close,
    /// Headers of the upgrade response
    Headers,
    /// Numeric code of the upgrade response
    Status,
    /// A usable channel was established
    Transport,
}

impl Event {
    /// Stable name, also used as the text payload of lifecycle dispatches
    pub fn name(&self) -> &'static str {
        match self {
            Event::Open => "OPEN",
            Event::Reconnect => "RECONNECT",
            Event::Message => "MESSAGE",
            Event::Error => "ERROR",
            Event::Close => "CLOSE",
            Event::Headers => "HEADERS",
            Event::Status => "STATUS",
            Event::Transport => "TRANSPORT",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
