//! # Domain Entities
//!
//! Wire messages and persisted records for the relay engine.

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::value_objects::{Bytes32, TransferKey};

/// Inbound cross-domain message envelope.
///
/// Decoded once per inbound message and never persisted; only its decoded
/// payload survives in the stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    /// Wire format version.
    pub version: u32,
    /// Domain the message originated from.
    pub source_domain: u32,
    /// Domain the message is addressed to.
    pub destination_domain: u32,
    /// Nonce, unique per source domain sender.
    pub nonce: u64,
    /// Sender on the source domain.
    pub sender: Bytes32,
    /// Recipient on the destination domain.
    pub recipient: Bytes32,
    /// Caller allowed to submit the message on the destination.
    pub destination_caller: Bytes32,
    /// Variable-length body, dispatched to exactly one payload decoder.
    pub body: Vec<u8>,
}

/// Burn payload carried in an envelope body: funds were burned remotely and
/// minted locally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnPayload {
    /// Payload format version.
    pub version: u32,
    /// Token burned on the source domain.
    pub burn_token: Bytes32,
    /// Local account the mint was credited to.
    pub mint_recipient: Bytes32,
    /// Amount burned, 256-bit unsigned.
    pub amount: U256,
    /// Sender of the burn on the source domain.
    pub message_sender: Bytes32,
}

/// Instruction describing where minted funds should be routed onward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForwardInstruction {
    /// Port to send the onward transfer from.
    pub port: String,
    /// Channel to send the onward transfer on.
    pub channel: String,
    /// Receiver address on the destination of the onward transfer.
    pub destination_receiver: String,
    /// Transfer memo.
    #[serde(default)]
    pub memo: String,
    /// Relative timeout in nanoseconds; zero selects the configured default.
    #[serde(default)]
    pub timeout_nanos: u64,
}

/// A fungible amount in a local denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Local token denomination.
    pub denom: String,
    /// Amount, 256-bit unsigned.
    pub amount: U256,
}

impl Coin {
    /// Create a new coin.
    pub fn new(denom: impl Into<String>, amount: U256) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

/// Persisted forward instruction, waiting for its mint or for an outcome.
///
/// Created on first sighting of a forward instruction for a key. `ack_error`
/// flips to `true` when the onward transfer fails; the record is deleted on
/// transfer success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardRecord {
    /// Sender on the source domain.
    pub sender: Bytes32,
    /// Message nonce.
    pub nonce: u64,
    /// The stored instruction.
    pub instruction: ForwardInstruction,
    /// Set when the onward transfer was acknowledged with an error.
    pub ack_error: bool,
}

/// Persisted mint notification, waiting for its forward instruction or for an
/// outcome. Deleted on transfer success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRecord {
    /// Sender on the source domain.
    pub sender: Bytes32,
    /// Message nonce.
    pub nonce: u64,
    /// Minted amount in the local denomination.
    pub amount: Coin,
    /// Domain the envelope was addressed to.
    pub destination_domain: u32,
    /// Local account the mint was credited to.
    pub mint_recipient: Bytes32,
}

/// Persisted record of one outstanding onward transfer.
///
/// Keyed by the transfer service's (channel, port, sequence); carries the
/// source domain so the correlation key can be rebuilt when an outcome
/// arrives. Deleted when the outcome is processed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightPacket {
    /// Remote domain of the correlated transfer.
    pub source_domain: u32,
    /// Sender on the source domain.
    pub sender: Bytes32,
    /// Message nonce.
    pub nonce: u64,
    /// Channel the packet was sent on.
    pub channel_id: String,
    /// Port the packet was sent from.
    pub port_id: String,
    /// Sequence assigned by the transfer service.
    pub sequence: u64,
}

impl InFlightPacket {
    /// Rebuild the correlation key for the forward and mint records.
    pub fn transfer_key(&self) -> TransferKey {
        TransferKey::new(self.source_domain, self.sender, self.nonce)
    }
}
