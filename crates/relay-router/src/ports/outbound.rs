//! # Outbound Ports
//!
//! Traits for the engine's external collaborators: the ledger store, the
//! transfer service, the token-pair registry, and the block-time source.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::{Bytes32, Coin, PacketKey, RelayError};
use crate::ports::inbound::PacketLifecycleApi;

/// Durable ordered key-value store - outbound port.
///
/// Injected into the engine; consulted synchronously and deterministically
/// within one state transition.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored at a key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, RelayError>;

    /// Set the value stored at a key.
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), RelayError>;

    /// Delete the value stored at a key. Deleting an absent key is a no-op.
    fn delete(&self, key: &[u8]) -> Result<(), RelayError>;

    /// Iterate all entries whose key starts with a prefix, in key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, RelayError>;
}

/// Parameters for one onward transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    /// Port to send from.
    pub port_id: String,
    /// Channel to send on.
    pub channel_id: String,
    /// Amount to transfer.
    pub token: Coin,
    /// Sending account (the mint recipient on this chain).
    pub sender: Bytes32,
    /// Receiver on the destination.
    pub receiver: String,
    /// Absolute timeout in nanoseconds.
    pub timeout_timestamp_nanos: u64,
    /// Transfer memo.
    pub memo: String,
}

/// Transfer service - outbound port.
#[async_trait]
pub trait TransferService: Send + Sync {
    /// Initiate an onward transfer. Returns the sequence number assigned to
    /// the resulting packet.
    async fn initiate_transfer(&self, request: TransferRequest) -> Result<u64, RelayError>;
}

/// Token-pair registry - outbound port.
pub trait TokenPairRegistry: Send + Sync {
    /// Resolve a (remote domain, remote token) pair to a local denomination.
    fn lookup(&self, remote_domain: u32, remote_token: &Bytes32) -> Option<String>;
}

/// Block-time source - outbound port.
///
/// Monotonically non-decreasing logical clock, used only for timeout
/// computation.
pub trait BlockTimeSource: Send + Sync {
    /// Current block time in nanoseconds.
    fn block_time_nanos(&self) -> u64;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock transfer service recording every request it receives.
#[derive(Default)]
pub struct MockTransferService {
    next_sequence: Mutex<u64>,
    /// Requests received, in order.
    pub requests: Mutex<Vec<TransferRequest>>,
    /// When set, every call fails with this message.
    pub fail_with: Mutex<Option<String>>,
}

impl MockTransferService {
    /// Create a new mock starting at sequence 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls fail.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.fail_with.lock() = Some(message.into());
    }

    /// Make subsequent calls succeed again.
    pub fn clear_failure(&self) {
        *self.fail_with.lock() = None;
    }

    /// Number of transfers initiated so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl TransferService for MockTransferService {
    async fn initiate_transfer(&self, request: TransferRequest) -> Result<u64, RelayError> {
        if let Some(message) = self.fail_with.lock().clone() {
            return Err(RelayError::Transfer(message));
        }
        self.requests.lock().push(request);
        let mut next = self.next_sequence.lock();
        let sequence = *next;
        *next += 1;
        Ok(sequence)
    }
}

/// Mock token-pair registry backed by a map.
#[derive(Default)]
pub struct MockTokenPairRegistry {
    pairs: Mutex<HashMap<(u32, Bytes32), String>>,
}

impl MockTokenPairRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token pair.
    pub fn register(&self, remote_domain: u32, remote_token: Bytes32, denom: impl Into<String>) {
        self.pairs
            .lock()
            .insert((remote_domain, remote_token), denom.into());
    }
}

impl TokenPairRegistry for MockTokenPairRegistry {
    fn lookup(&self, remote_domain: u32, remote_token: &Bytes32) -> Option<String> {
        self.pairs
            .lock()
            .get(&(remote_domain, *remote_token))
            .cloned()
    }
}

/// Fixed block-time source for tests.
pub struct FixedClock {
    nanos: Mutex<u64>,
}

impl FixedClock {
    /// Create a clock pinned at the given time.
    pub fn new(nanos: u64) -> Self {
        Self {
            nanos: Mutex::new(nanos),
        }
    }

    /// Advance the clock. Block time never moves backwards.
    pub fn advance(&self, delta_nanos: u64) {
        let mut nanos = self.nanos.lock();
        *nanos = nanos.saturating_add(delta_nanos);
    }
}

impl BlockTimeSource for FixedClock {
    fn block_time_nanos(&self) -> u64 {
        *self.nanos.lock()
    }
}

/// Recording next-in-stack lifecycle handler.
#[derive(Default)]
pub struct RecordingLifecycle {
    /// Acknowledgements delegated to this handler.
    pub acks: Mutex<Vec<PacketKey>>,
    /// Timeouts delegated to this handler.
    pub timeouts: Mutex<Vec<PacketKey>>,
}

impl RecordingLifecycle {
    /// Create a new recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PacketLifecycleApi for RecordingLifecycle {
    async fn on_acknowledgement(&self, key: &PacketKey, _ack: &[u8]) -> Result<(), RelayError> {
        self.acks.lock().push(key.clone());
        Ok(())
    }

    async fn on_timeout(&self, key: &PacketKey) -> Result<(), RelayError> {
        self.timeouts.lock().push(key.clone());
        Ok(())
    }
}
