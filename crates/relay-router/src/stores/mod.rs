//! # Record Stores
//!
//! Typed persistence for the three record types, layered over an injected
//! [`KeyValueStore`]. Values are bincode-encoded.

pub mod keys;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{ForwardRecord, InFlightPacket, MintRecord, PacketKey, RelayError, TransferKey};
use crate::ports::KeyValueStore;

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, RelayError> {
    bincode::serialize(value).map_err(|e| RelayError::Store(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RelayError> {
    bincode::deserialize(bytes).map_err(|e| RelayError::Store(e.to_string()))
}

/// Keyed persistence for [`ForwardRecord`]s.
#[derive(Clone)]
pub struct ForwardStore {
    store: Arc<dyn KeyValueStore>,
}

impl ForwardStore {
    /// Create a store over the injected KV backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a record under its transfer key.
    pub fn set(&self, key: &TransferKey, record: &ForwardRecord) -> Result<(), RelayError> {
        self.store
            .set(&keys::transfer_record_key(keys::FORWARD_PREFIX, key), encode(record)?)
    }

    /// Look up the record for a transfer key.
    pub fn get(&self, key: &TransferKey) -> Result<Option<ForwardRecord>, RelayError> {
        match self
            .store
            .get(&keys::transfer_record_key(keys::FORWARD_PREFIX, key))?
        {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Delete the record for a transfer key.
    pub fn delete(&self, key: &TransferKey) -> Result<(), RelayError> {
        self.store
            .delete(&keys::transfer_record_key(keys::FORWARD_PREFIX, key))
    }

    /// All stored forward records, across every source domain.
    pub fn get_all(&self) -> Result<Vec<ForwardRecord>, RelayError> {
        self.store
            .scan_prefix(&[keys::FORWARD_PREFIX])?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }
}

/// Keyed persistence for [`MintRecord`]s.
#[derive(Clone)]
pub struct MintStore {
    store: Arc<dyn KeyValueStore>,
}

impl MintStore {
    /// Create a store over the injected KV backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a record under its transfer key.
    pub fn set(&self, key: &TransferKey, record: &MintRecord) -> Result<(), RelayError> {
        self.store
            .set(&keys::transfer_record_key(keys::MINT_PREFIX, key), encode(record)?)
    }

    /// Look up the record for a transfer key.
    pub fn get(&self, key: &TransferKey) -> Result<Option<MintRecord>, RelayError> {
        match self
            .store
            .get(&keys::transfer_record_key(keys::MINT_PREFIX, key))?
        {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Delete the record for a transfer key.
    pub fn delete(&self, key: &TransferKey) -> Result<(), RelayError> {
        self.store
            .delete(&keys::transfer_record_key(keys::MINT_PREFIX, key))
    }

    /// All stored mint records, across every source domain.
    pub fn get_all(&self) -> Result<Vec<MintRecord>, RelayError> {
        self.store
            .scan_prefix(&[keys::MINT_PREFIX])?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }
}

/// Keyed persistence for [`InFlightPacket`]s.
#[derive(Clone)]
pub struct InFlightStore {
    store: Arc<dyn KeyValueStore>,
}

impl InFlightStore {
    /// Create a store over the injected KV backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a packet under its transfer-service tuple key.
    pub fn set(&self, key: &PacketKey, packet: &InFlightPacket) -> Result<(), RelayError> {
        self.store.set(&keys::in_flight_key(key), encode(packet)?)
    }

    /// Look up the packet for a tuple key.
    pub fn get(&self, key: &PacketKey) -> Result<Option<InFlightPacket>, RelayError> {
        match self.store.get(&keys::in_flight_key(key))? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Delete the packet for a tuple key.
    pub fn delete(&self, key: &PacketKey) -> Result<(), RelayError> {
        self.store.delete(&keys::in_flight_key(key))
    }

    /// All outstanding packets.
    pub fn get_all(&self) -> Result<Vec<InFlightPacket>, RelayError> {
        self.store
            .scan_prefix(&[keys::IN_FLIGHT_PREFIX])?
            .iter()
            .map(|(_, bytes)| decode(bytes))
            .collect()
    }
}
