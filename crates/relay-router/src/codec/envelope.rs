//! Fixed-offset binary codec for the message envelope.
//!
//! All multi-byte fields are big-endian. The header is 116 bytes; the body is
//! whatever follows it.

use crate::domain::{Bytes32, Envelope, RelayError};

/// Fixed header size before the variable-length body.
pub const ENVELOPE_HEADER_BYTES: usize = 116;

const VERSION_OFFSET: usize = 0;
const SOURCE_DOMAIN_OFFSET: usize = 4;
const DESTINATION_DOMAIN_OFFSET: usize = 8;
const NONCE_OFFSET: usize = 12;
const SENDER_OFFSET: usize = 20;
const RECIPIENT_OFFSET: usize = 52;
const DESTINATION_CALLER_OFFSET: usize = 84;
const BODY_OFFSET: usize = 116;

fn read_u32(raw: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&raw[offset..offset + 4]);
    u32::from_be_bytes(buf)
}

fn read_u64(raw: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&raw[offset..offset + 8]);
    u64::from_be_bytes(buf)
}

pub(crate) fn read_bytes32(raw: &[u8], offset: usize) -> Bytes32 {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&raw[offset..offset + 32]);
    buf
}

/// Decode an envelope from raw bytes.
///
/// Fails if the input is shorter than the fixed header.
pub fn decode_envelope(raw: &[u8]) -> Result<Envelope, RelayError> {
    if raw.len() < ENVELOPE_HEADER_BYTES {
        return Err(RelayError::DecodeMessage {
            got: raw.len(),
            min: ENVELOPE_HEADER_BYTES,
        });
    }

    Ok(Envelope {
        version: read_u32(raw, VERSION_OFFSET),
        source_domain: read_u32(raw, SOURCE_DOMAIN_OFFSET),
        destination_domain: read_u32(raw, DESTINATION_DOMAIN_OFFSET),
        nonce: read_u64(raw, NONCE_OFFSET),
        sender: read_bytes32(raw, SENDER_OFFSET),
        recipient: read_bytes32(raw, RECIPIENT_OFFSET),
        destination_caller: read_bytes32(raw, DESTINATION_CALLER_OFFSET),
        body: raw[BODY_OFFSET..].to_vec(),
    })
}

/// Encode an envelope to raw bytes. Mirrors [`decode_envelope`] field for
/// field at the same offsets.
pub fn encode_envelope(envelope: &Envelope) -> Vec<u8> {
    let mut raw = Vec::with_capacity(ENVELOPE_HEADER_BYTES + envelope.body.len());
    raw.extend_from_slice(&envelope.version.to_be_bytes());
    raw.extend_from_slice(&envelope.source_domain.to_be_bytes());
    raw.extend_from_slice(&envelope.destination_domain.to_be_bytes());
    raw.extend_from_slice(&envelope.nonce.to_be_bytes());
    raw.extend_from_slice(&envelope.sender);
    raw.extend_from_slice(&envelope.recipient);
    raw.extend_from_slice(&envelope.destination_caller);
    raw.extend_from_slice(&envelope.body);
    raw
}
