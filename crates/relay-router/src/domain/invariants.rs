//! # Domain Invariants
//!
//! Consistency rules the state machine guarantees. A violated invariant means
//! the record set can no longer be trusted; the resulting error is fatal and
//! must never be caught and retried.

use super::entities::{ForwardRecord, InFlightPacket, MintRecord};
use super::errors::RelayError;
use super::value_objects::{PacketKey, TransferKey};

/// Invariant: a retry or timeout reconciliation must find both the forward
/// record and the mint record still present for its key.
pub fn invariant_retry_records_present(
    forward: Option<ForwardRecord>,
    mint: Option<MintRecord>,
    key: &TransferKey,
) -> Result<(ForwardRecord, MintRecord), RelayError> {
    match (forward, mint) {
        (Some(forward), Some(mint)) => Ok((forward, mint)),
        (None, _) => Err(RelayError::InconsistentState {
            context: format!(
                "forward record missing during retry: domain={}, nonce={}",
                key.source_domain, key.nonce
            ),
        }),
        (_, None) => Err(RelayError::InconsistentState {
            context: format!(
                "mint record missing during retry: domain={}, nonce={}",
                key.source_domain, key.nonce
            ),
        }),
    }
}

/// Invariant: at most one in-flight packet exists per (channel, port,
/// sequence). The transfer service never reuses a sequence for a packet that
/// is still tracked, so finding one here means the record set is corrupt.
pub fn invariant_packet_untracked(
    existing: Option<&InFlightPacket>,
    key: &PacketKey,
) -> Result<(), RelayError> {
    if existing.is_some() {
        return Err(RelayError::InconsistentState {
            context: format!(
                "in-flight packet already tracked: channel={}, port={}, sequence={}",
                key.channel_id, key.port_id, key.sequence
            ),
        });
    }
    Ok(())
}
