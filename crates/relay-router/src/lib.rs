//! # Relay Router
//!
//! Cross-domain message relay and forwarding engine.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Two independent, asynchronously-arriving signals describe one logical
//! cross-domain transfer: a mint notification (funds arrived locally) and a
//! forward instruction (where those funds should be routed onward). Either
//! may arrive first. This crate correlates them by a composite key, executes
//! the onward transfer exactly once, and reconciles the outcome (success,
//! failure, or timeout), including the retry path.
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | At-most-one execution | Duplicate forward instructions rejected while in flight |
//! | Atomic cleanup | Forward, mint, and in-flight records deleted together on success |
//! | Fail-closed | Invariant violations surface as fatal errors, never partial state |
//! | Exogenous retry | Redelivery, explicit `retry`, or timeout callback; no internal timers |
//!
//! ## Module Structure
//!
//! ```text
//! relay-router/
//! ├── domain/          # Envelope, records, keys, phases, errors
//! ├── codec/           # Fixed-offset and self-describing wire codecs
//! ├── ports/           # MessageRelayApi, KeyValueStore, TransferService
//! ├── stores/          # Typed forward/mint/in-flight persistence
//! ├── adapters/        # In-memory store backend
//! └── application/     # RelayService and outcome reconciliation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod codec;
pub mod config;
pub mod domain;
pub mod ports;
pub mod stores;

// Re-exports
pub use adapters::MemoryStore;
pub use application::{RelayDeps, RelayService};
pub use codec::{
    classify_body, decode_acknowledgement, decode_burn_payload, decode_envelope,
    decode_forward_instruction, encode_acknowledgement, encode_burn_payload, encode_envelope,
    encode_forward_instruction, Body, BURN_PAYLOAD_BYTES, ENVELOPE_HEADER_BYTES,
};
pub use config::{RelayConfig, DEFAULT_TRANSFER_TIMEOUT_NANOS};
pub use domain::{
    invariant_packet_untracked, invariant_retry_records_present, Acknowledgement, BurnPayload,
    Bytes32, Coin, Envelope, ForwardInstruction, ForwardRecord, InFlightPacket, MintRecord,
    PacketKey, RelayError, RelayPhase, TransferKey,
};
pub use ports::{
    BlockTimeSource, FixedClock, KeyValueStore, MessageRelayApi, MockTokenPairRegistry,
    MockTransferService, PacketLifecycleApi, RecordingLifecycle, TokenPairRegistry,
    TransferRequest, TransferService,
};
pub use stores::{ForwardStore, InFlightStore, MintStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
