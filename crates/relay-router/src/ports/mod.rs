//! # Ports
//!
//! Inbound and outbound port traits (hexagonal architecture), plus mock
//! implementations for testing.

pub mod inbound;
pub mod outbound;

pub use inbound::{MessageRelayApi, PacketLifecycleApi};
pub use outbound::{
    BlockTimeSource, FixedClock, KeyValueStore, MockTokenPairRegistry, MockTransferService,
    RecordingLifecycle, TokenPairRegistry, TransferRequest, TransferService,
};
