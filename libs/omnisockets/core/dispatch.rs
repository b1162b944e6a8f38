//! Type-directed callback dispatch
//!
//! # Architecture
//!
//! ```text
//! network callback → decoder chain → Payload ── kind tag ──> matching FunctionWrappers
//!                        │ (raw only)                              (all of them, in
//!                        └── miss → FunctionResolver                registration order)
//! ```
//!
//! # Guarantees
//!
//! - **All matches fire**: every wrapper whose kind and scope match is
//!   invoked, not just the first
//! - **Registration order**: wrappers fire in the order they were registered
//! - **Miss is not an error**: an undecodable or unmatched payload returns
//!   `false` and drops silently

use crate::core::event::Event;
use crate::core::payload::Payload;
use crate::traits::decoder::Decoder;
use crate::traits::function::{FunctionResolver, FunctionWrapper};
use std::sync::Arc;
use tracing::debug;

/// Inbound value for one dispatch
///
/// Raw wire payloads still need the decoder chain; lifecycle callbacks
/// hand over an already-typed value.
pub enum Inbound<'a> {
    Raw(&'a str),
    Value(Payload),
}

/// Fan a decoded value out to every matching registered callback
///
/// Raw input runs through `decoders` first; the first decoder returning
/// `Some` wins. If the whole chain misses, `resolver` gets one shot
/// before the payload is dropped.
///
/// Returns true iff at least one callback was invoked.
pub fn dispatch(
    event: Event,
    decoders: &[Arc<dyn Decoder>],
    functions: &[Arc<FunctionWrapper>],
    inbound: Inbound<'_>,
    resolver: &dyn FunctionResolver,
) -> bool {
    let payload = match inbound {
        Inbound::Value(value) => Some(value),
        Inbound::Raw(raw) => decoders
            .iter()
            .find_map(|decoder| decoder.decode(event, raw))
            .or_else(|| resolver.resolve(event, raw)),
    };

    let Some(payload) = payload else {
        debug!(%event, "no decoder produced a value, dropping payload");
        return false;
    };

    let kind = payload.kind();
    let mut handled = false;
    for function in functions {
        if function.accepts(event, kind) {
            function.invoke(&payload);
            handled = true;
        }
    }
    handled
}
