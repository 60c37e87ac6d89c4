//! # Inbound Ports
//!
//! Entry points the host environment drives the engine through.

use async_trait::async_trait;

use crate::domain::{PacketKey, RelayError, TransferKey};

/// Message relay API - inbound port.
#[async_trait]
pub trait MessageRelayApi: Send + Sync {
    /// Handle one inbound cross-domain message.
    ///
    /// Decodes the envelope, dispatches its body, correlates the two halves
    /// of a transfer, and initiates the onward transfer once both are present.
    async fn handle_message(&self, raw: &[u8]) -> Result<(), RelayError>;

    /// Explicitly retry the onward transfer for a key whose last attempt was
    /// acknowledged with an error.
    ///
    /// Callable by an external scheduler; equivalent in effect to redelivering
    /// the stored forward instruction.
    async fn retry(&self, key: &TransferKey) -> Result<(), RelayError>;
}

/// Packet lifecycle callbacks - inbound port.
///
/// The engine sits in a handler stack: outcomes for packets it does not track
/// are delegated to the next handler below it, which implements this same
/// trait.
#[async_trait]
pub trait PacketLifecycleApi: Send + Sync {
    /// An acknowledgement arrived for a packet.
    async fn on_acknowledgement(&self, key: &PacketKey, ack: &[u8]) -> Result<(), RelayError>;

    /// A packet timed out without an acknowledgement.
    async fn on_timeout(&self, key: &PacketKey) -> Result<(), RelayError>;
}
