//! # Domain Layer
//!
//! Entities, value objects, invariants, and errors for the relay engine.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::{
    BurnPayload, Coin, Envelope, ForwardInstruction, ForwardRecord, InFlightPacket, MintRecord,
};
pub use errors::RelayError;
pub use invariants::{invariant_packet_untracked, invariant_retry_records_present};
pub use value_objects::{Acknowledgement, Bytes32, PacketKey, RelayPhase, TransferKey};
