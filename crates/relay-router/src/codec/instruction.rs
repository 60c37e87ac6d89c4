//! Codec for the forward instruction payload.
//!
//! Unlike the fixed-offset envelope and burn formats, the forward instruction
//! rides in a self-describing, schema-checked encoding (JSON with unknown
//! fields rejected).

use crate::domain::{ForwardInstruction, RelayError};

/// Decode a forward instruction from an envelope body.
pub fn decode_forward_instruction(raw: &[u8]) -> Result<ForwardInstruction, RelayError> {
    serde_json::from_slice(raw).map_err(|e| RelayError::DecodeForwardInstruction(e.to_string()))
}

/// Encode a forward instruction into an envelope body.
pub fn encode_forward_instruction(
    instruction: &ForwardInstruction,
) -> Result<Vec<u8>, RelayError> {
    serde_json::to_vec(instruction).map_err(|e| RelayError::Store(e.to_string()))
}
