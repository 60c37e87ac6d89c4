//! Storage key construction.
//!
//! Forward and mint records share the composite transfer key layout:
//! `prefix ‖ source_domain_be ‖ SHA-256(nonce_be ‖ sender)`. In-flight
//! packets use the literal transfer-service tuple with length-prefixed
//! string components so keys can never collide across channel/port splits.

use crate::domain::{PacketKey, TransferKey};

/// Prefix byte for forward records.
pub const FORWARD_PREFIX: u8 = 0x01;
/// Prefix byte for mint records.
pub const MINT_PREFIX: u8 = 0x02;
/// Prefix byte for in-flight packets.
pub const IN_FLIGHT_PREFIX: u8 = 0x03;

/// Build the storage key for a forward or mint record.
pub fn transfer_record_key(prefix: u8, key: &TransferKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 4 + 32);
    out.push(prefix);
    out.extend_from_slice(&key.source_domain.to_be_bytes());
    out.extend_from_slice(&key.storage_hash());
    out
}

/// Build the storage key for an in-flight packet.
pub fn in_flight_key(key: &PacketKey) -> Vec<u8> {
    let channel = key.channel_id.as_bytes();
    let port = key.port_id.as_bytes();
    let mut out = Vec::with_capacity(1 + 4 + channel.len() + 4 + port.len() + 8);
    out.push(IN_FLIGHT_PREFIX);
    out.extend_from_slice(&(channel.len() as u32).to_be_bytes());
    out.extend_from_slice(channel);
    out.extend_from_slice(&(port.len() as u32).to_be_bytes());
    out.extend_from_slice(port);
    out.extend_from_slice(&key.sequence.to_be_bytes());
    out
}
