use crate::core::event::Event;
use crate::core::payload::Payload;

/// Trait for converting raw inbound payloads into domain values
///
/// Decoders are chained on the `Request`. For each raw payload the chain
/// is walked in registration order and the first decoder returning `Some`
/// wins; returning `None` means "no match" and hands the payload to the
/// next decoder. The chain is never empty: an [`IdentityDecoder`] is
/// installed when the caller supplies none.
///
/// The `event` argument lets a decoder restrict itself to one event
/// category (for example, only decode `Event::Message` payloads).
pub trait Decoder: Send + Sync {
    /// Decode a raw payload received for the given event
    ///
    /// # Returns
    /// * `Some(payload)` - Decoded domain value, stops the chain
    /// * `None` - No match, the next decoder in the chain runs
    fn decode(&self, event: Event, raw: &str) -> Option<Payload>;
}

impl<F> Decoder for F
where
    F: Fn(Event, &str) -> Option<Payload> + Send + Sync,
{
    fn decode(&self, event: Event, raw: &str) -> Option<Payload> {
        self(event, raw)
    }
}

/// Default decoder: passes the raw text through untouched
pub struct IdentityDecoder;

impl Decoder for IdentityDecoder {
    fn decode(&self, _event: Event, raw: &str) -> Option<Payload> {
        Some(Payload::Text(raw.to_owned()))
    }
}

/// Decodes payloads that parse as JSON, leaves everything else to the chain
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, _event: Event, raw: &str) -> Option<Payload> {
        serde_json::from_str::<serde_json::Value>(raw)
            .ok()
            .map(Payload::Json)
    }
}

/// Decodes payloads that parse as signed 64-bit integers
pub struct IntegerDecoder;

impl Decoder for IntegerDecoder {
    fn decode(&self, _event: Event, raw: &str) -> Option<Payload> {
        raw.parse::<i64>().ok().map(Payload::Integer)
    }
}
