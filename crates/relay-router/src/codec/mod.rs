//! # Wire Codec
//!
//! Decoders and encoders for the cross-domain wire formats: the fixed-offset
//! envelope and burn payload, the self-describing forward instruction, and
//! the acknowledgement envelope.

pub mod ack;
pub mod burn;
pub mod envelope;
pub mod instruction;

pub use ack::{decode_acknowledgement, encode_acknowledgement};
pub use burn::{decode_burn_payload, encode_burn_payload, BURN_PAYLOAD_BYTES};
pub use envelope::{decode_envelope, encode_envelope, ENVELOPE_HEADER_BYTES};
pub use instruction::{decode_forward_instruction, encode_forward_instruction};

use crate::domain::{BurnPayload, ForwardInstruction};

/// Result of dispatching an envelope body to the payload decoders.
///
/// The two body formats are mutually exclusive: a forward instruction is
/// self-describing JSON, a burn payload is fixed-width binary, and a body is
/// never valid under both. A body matching neither is a distinct outcome, not
/// an error; unrelated message types may share the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// The body decoded as a forward instruction.
    Forward(ForwardInstruction),
    /// The body decoded as a burn payload.
    Burn(BurnPayload),
    /// The body matched neither schema.
    Unrecognized,
}

/// Dispatch an envelope body: try the forward-instruction decoder first, then
/// the burn-payload decoder.
pub fn classify_body(body: &[u8]) -> Body {
    if let Ok(instruction) = decode_forward_instruction(body) {
        return Body::Forward(instruction);
    }
    if let Ok(burn) = decode_burn_payload(body) {
        return Body::Burn(burn);
    }
    Body::Unrecognized
}
