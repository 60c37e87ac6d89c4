//! # Domain Value Objects
//!
//! Immutable value types: correlation keys, the derived relay phase, and
//! acknowledgement outcomes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::entities::{ForwardRecord, MintRecord};

/// 32-byte field type used for senders, recipients, and tokens.
pub type Bytes32 = [u8; 32];

/// Correlation key for one logical cross-domain transfer.
///
/// Both halves of a transfer (mint notification and forward instruction) are
/// filed under the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferKey {
    /// Remote domain the message originated from.
    pub source_domain: u32,
    /// Sender on the source domain.
    pub sender: Bytes32,
    /// Message nonce, unique per source domain sender.
    pub nonce: u64,
}

impl TransferKey {
    /// Create a new transfer key.
    pub fn new(source_domain: u32, sender: Bytes32, nonce: u64) -> Self {
        Self {
            source_domain,
            sender,
            nonce,
        }
    }

    /// Fixed-width storage hash: SHA-256 over nonce (big-endian) and sender.
    ///
    /// Stored keys carry the hash rather than the raw fields; not reversible.
    pub fn storage_hash(&self) -> Bytes32 {
        let mut hasher = Sha256::new();
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(self.sender);
        hasher.finalize().into()
    }
}

/// Transfer-service correlation key for an outstanding packet.
///
/// Distinct from [`TransferKey`]: acknowledgements and timeouts arrive keyed
/// by channel, port, and sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketKey {
    /// Channel the packet was sent on.
    pub channel_id: String,
    /// Port the packet was sent from.
    pub port_id: String,
    /// Sequence number assigned by the transfer service.
    pub sequence: u64,
}

impl PacketKey {
    /// Create a new packet key.
    pub fn new(channel_id: impl Into<String>, port_id: impl Into<String>, sequence: u64) -> Self {
        Self {
            channel_id: channel_id.into(),
            port_id: port_id.into(),
            sequence,
        }
    }
}

/// Relay state machine for one correlation key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayPhase {
    /// Nothing seen for this key yet.
    #[default]
    Idle,
    /// Forward instruction stored, mint notification outstanding.
    WaitingMint,
    /// Mint notification stored, forward instruction outstanding.
    WaitingForward,
    /// Onward transfer initiated, outcome outstanding.
    InFlight,
    /// Transfer acknowledged with an error; a redelivery or explicit retry
    /// will re-forward.
    Retryable,
    /// Transfer succeeded, records deleted.
    Done,
}

impl RelayPhase {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: RelayPhase) -> bool {
        match (self, next) {
            (Self::Idle, Self::WaitingMint) => true,
            (Self::Idle, Self::WaitingForward) => true,
            (Self::WaitingMint, Self::InFlight) => true,
            (Self::WaitingForward, Self::InFlight) => true,
            (Self::InFlight, Self::Done) => true,
            (Self::InFlight, Self::Retryable) => true,
            // Timeout re-forwards immediately with the same records.
            (Self::InFlight, Self::InFlight) => true,
            (Self::Retryable, Self::InFlight) => true,
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Derive the phase from the stored record set for a key.
    pub fn from_records(
        forward: Option<&ForwardRecord>,
        mint: Option<&MintRecord>,
        in_flight: bool,
    ) -> Self {
        if in_flight {
            return Self::InFlight;
        }
        match (forward, mint) {
            (None, None) => Self::Idle,
            (Some(_), None) => Self::WaitingMint,
            (None, Some(_)) => Self::WaitingForward,
            (Some(record), Some(_)) => {
                if record.ack_error {
                    Self::Retryable
                } else {
                    Self::InFlight
                }
            }
        }
    }
}

/// Decoded outcome of an onward transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Acknowledgement {
    /// Transfer completed on the destination; opaque result payload.
    Success(Vec<u8>),
    /// Transfer failed on the destination.
    Error(String),
}

impl Acknowledgement {
    /// Whether the acknowledgement signals success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
