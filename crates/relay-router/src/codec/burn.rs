//! Fixed-offset binary codec for the burn payload.

use primitive_types::U256;

use super::envelope::read_bytes32;
use crate::domain::{BurnPayload, RelayError};

/// Exact burn payload size: 4 + 32 + 32 + 32 + 32.
pub const BURN_PAYLOAD_BYTES: usize = 132;

const VERSION_OFFSET: usize = 0;
const BURN_TOKEN_OFFSET: usize = 4;
const MINT_RECIPIENT_OFFSET: usize = 36;
const AMOUNT_OFFSET: usize = 68;
const MESSAGE_SENDER_OFFSET: usize = 100;

/// Decode a burn payload. Fails unless the input is exactly
/// [`BURN_PAYLOAD_BYTES`] long.
pub fn decode_burn_payload(raw: &[u8]) -> Result<BurnPayload, RelayError> {
    if raw.len() != BURN_PAYLOAD_BYTES {
        return Err(RelayError::DecodeBurnPayload {
            got: raw.len(),
            expected: BURN_PAYLOAD_BYTES,
        });
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&raw[VERSION_OFFSET..VERSION_OFFSET + 4]);

    Ok(BurnPayload {
        version: u32::from_be_bytes(version),
        burn_token: read_bytes32(raw, BURN_TOKEN_OFFSET),
        mint_recipient: read_bytes32(raw, MINT_RECIPIENT_OFFSET),
        amount: U256::from_big_endian(&raw[AMOUNT_OFFSET..AMOUNT_OFFSET + 32]),
        message_sender: read_bytes32(raw, MESSAGE_SENDER_OFFSET),
    })
}

/// Encode a burn payload. Mirrors [`decode_burn_payload`] field for field.
pub fn encode_burn_payload(payload: &BurnPayload) -> Vec<u8> {
    let mut raw = Vec::with_capacity(BURN_PAYLOAD_BYTES);
    raw.extend_from_slice(&payload.version.to_be_bytes());
    raw.extend_from_slice(&payload.burn_token);
    raw.extend_from_slice(&payload.mint_recipient);
    let mut amount = [0u8; 32];
    payload.amount.to_big_endian(&mut amount);
    raw.extend_from_slice(&amount);
    raw.extend_from_slice(&payload.message_sender);
    raw
}
