//! # Relay Service
//!
//! Application service implementing the correlation and dispatch state
//! machine: `handle_message`, `forward_packet`, and the explicit retry entry
//! point. Outcome reconciliation lives in the sibling `lifecycle` module.

use async_trait::async_trait;
use std::sync::Arc;

use crate::codec::{self, Body};
use crate::config::RelayConfig;
use crate::domain::{
    invariant_packet_untracked, invariant_retry_records_present, BurnPayload, Coin, Envelope,
    ForwardInstruction, ForwardRecord, InFlightPacket, MintRecord, PacketKey, RelayError,
    RelayPhase, TransferKey,
};
use crate::ports::{
    BlockTimeSource, KeyValueStore, MessageRelayApi, PacketLifecycleApi, TokenPairRegistry,
    TransferRequest, TransferService,
};
use crate::stores::{ForwardStore, InFlightStore, MintStore};

/// External collaborators injected into the relay service.
pub struct RelayDeps {
    /// Durable key-value backend shared by the three record stores.
    pub store: Arc<dyn KeyValueStore>,
    /// Onward transfer initiator.
    pub transfer: Arc<dyn TransferService>,
    /// (remote domain, remote token) to local denomination resolver.
    pub registry: Arc<dyn TokenPairRegistry>,
    /// Block-time source for timeout computation.
    pub clock: Arc<dyn BlockTimeSource>,
    /// Next packet-lifecycle handler in the stack.
    pub next: Arc<dyn PacketLifecycleApi>,
}

/// Relay Service - correlates mint notifications with forward instructions
/// and executes the onward transfer exactly once per key.
pub struct RelayService {
    pub(crate) config: RelayConfig,
    pub(crate) forwards: ForwardStore,
    pub(crate) mints: MintStore,
    pub(crate) in_flight: InFlightStore,
    pub(crate) transfer: Arc<dyn TransferService>,
    pub(crate) registry: Arc<dyn TokenPairRegistry>,
    pub(crate) clock: Arc<dyn BlockTimeSource>,
    pub(crate) next: Arc<dyn PacketLifecycleApi>,
}

impl RelayService {
    /// Create a new relay service.
    pub fn new(config: RelayConfig, deps: RelayDeps) -> Self {
        Self {
            config,
            forwards: ForwardStore::new(deps.store.clone()),
            mints: MintStore::new(deps.store.clone()),
            in_flight: InFlightStore::new(deps.store),
            transfer: deps.transfer,
            registry: deps.registry,
            clock: deps.clock,
            next: deps.next,
        }
    }

    /// Handle one inbound cross-domain message.
    pub async fn handle_message(&self, raw: &[u8]) -> Result<(), RelayError> {
        let envelope = codec::decode_envelope(raw)?;
        if envelope.body.len() > self.config.max_body_bytes {
            return Err(RelayError::BodyTooLarge {
                got: envelope.body.len(),
                max: self.config.max_body_bytes,
            });
        }

        match codec::classify_body(&envelope.body) {
            Body::Forward(instruction) => self.handle_forward(&envelope, instruction).await,
            Body::Burn(burn) => self.handle_burn(&envelope, burn).await,
            Body::Unrecognized => {
                // Unrelated message types share the transport; not an error.
                tracing::debug!(
                    source_domain = envelope.source_domain,
                    nonce = envelope.nonce,
                    "envelope body matched no known schema, ignoring"
                );
                Ok(())
            }
        }
    }

    /// Forward branch: file the instruction and forward if the mint is
    /// already here.
    async fn handle_forward(
        &self,
        envelope: &Envelope,
        instruction: ForwardInstruction,
    ) -> Result<(), RelayError> {
        let key = TransferKey::new(envelope.source_domain, envelope.sender, envelope.nonce);

        match self.forwards.get(&key)? {
            Some(record) if record.ack_error => {
                // Redelivery after a failed acknowledgement: retry signal.
                let mint = self.mints.get(&key)?;
                let (record, mint) = invariant_retry_records_present(Some(record), mint, &key)?;
                tracing::info!(
                    source_domain = key.source_domain,
                    nonce = key.nonce,
                    sender = %hex::encode(key.sender),
                    "re-forwarding after acknowledged error"
                );
                self.retry_forward(&key, record, &mint).await
            }
            Some(_) => Err(RelayError::ForwardInProgress {
                source_domain: key.source_domain,
                nonce: key.nonce,
            }),
            None => {
                let record = ForwardRecord {
                    sender: envelope.sender,
                    nonce: envelope.nonce,
                    instruction: instruction.clone(),
                    ack_error: false,
                };
                self.forwards.set(&key, &record)?;

                match self.mints.get(&key)? {
                    Some(mint) => self.forward_packet(&key, &instruction, &mint).await,
                    None => {
                        tracing::debug!(
                            source_domain = key.source_domain,
                            nonce = key.nonce,
                            "forward instruction stored, waiting for mint"
                        );
                        Ok(())
                    }
                }
            }
        }
    }

    /// Mint branch: resolve the local denomination, file the mint, and
    /// forward if the instruction is already here.
    async fn handle_burn(&self, envelope: &Envelope, burn: BurnPayload) -> Result<(), RelayError> {
        let denom = self
            .registry
            .lookup(envelope.source_domain, &burn.burn_token)
            .ok_or(RelayError::UnknownBurnToken {
                source_domain: envelope.source_domain,
            })?;

        // The mint is keyed by the burn payload's own sender field.
        let key = TransferKey::new(envelope.source_domain, burn.message_sender, envelope.nonce);
        let mint = MintRecord {
            sender: burn.message_sender,
            nonce: envelope.nonce,
            amount: Coin::new(denom, burn.amount),
            destination_domain: envelope.destination_domain,
            mint_recipient: burn.mint_recipient,
        };
        self.mints.set(&key, &mint)?;

        match self.forwards.get(&key)? {
            Some(record) => self.forward_packet(&key, &record.instruction, &mint).await,
            None => {
                tracing::debug!(
                    source_domain = key.source_domain,
                    nonce = key.nonce,
                    denom = %mint.amount.denom,
                    "mint stored, waiting for forward instruction"
                );
                Ok(())
            }
        }
    }

    /// Initiate the onward transfer for a correlated (instruction, mint)
    /// pair and track the resulting packet.
    ///
    /// Transfer-service errors propagate unchanged; this call is not itself
    /// retried.
    pub async fn forward_packet(
        &self,
        key: &TransferKey,
        instruction: &ForwardInstruction,
        mint: &MintRecord,
    ) -> Result<(), RelayError> {
        let relative = if instruction.timeout_nanos == 0 {
            self.config.default_timeout_nanos
        } else {
            instruction.timeout_nanos
        };
        let timeout = self.clock.block_time_nanos().saturating_add(relative);

        let sequence = self
            .transfer
            .initiate_transfer(TransferRequest {
                port_id: instruction.port.clone(),
                channel_id: instruction.channel.clone(),
                token: mint.amount.clone(),
                sender: mint.mint_recipient,
                receiver: instruction.destination_receiver.clone(),
                timeout_timestamp_nanos: timeout,
                memo: instruction.memo.clone(),
            })
            .await?;

        let packet_key = PacketKey::new(instruction.channel.clone(), instruction.port.clone(), sequence);
        invariant_packet_untracked(self.in_flight.get(&packet_key)?.as_ref(), &packet_key)?;

        self.in_flight.set(
            &packet_key,
            &InFlightPacket {
                source_domain: key.source_domain,
                sender: key.sender,
                nonce: key.nonce,
                channel_id: instruction.channel.clone(),
                port_id: instruction.port.clone(),
                sequence,
            },
        )?;

        tracing::info!(
            source_domain = key.source_domain,
            nonce = key.nonce,
            channel = %instruction.channel,
            port = %instruction.port,
            sequence,
            "onward transfer initiated"
        );
        Ok(())
    }

    /// Explicit retry entry point for an external scheduler.
    pub async fn retry(&self, key: &TransferKey) -> Result<(), RelayError> {
        match self.forwards.get(key)? {
            Some(record) if record.ack_error => {
                let mint = self.mints.get(key)?;
                let (record, mint) = invariant_retry_records_present(Some(record), mint, key)?;
                self.retry_forward(key, record, &mint).await
            }
            _ => Err(RelayError::NotRetryable {
                source_domain: key.source_domain,
                nonce: key.nonce,
            }),
        }
    }

    /// Re-forward a retryable key. `ack_error` is cleared only once the
    /// transfer call succeeds, so a failed attempt leaves the key retryable.
    async fn retry_forward(
        &self,
        key: &TransferKey,
        record: ForwardRecord,
        mint: &MintRecord,
    ) -> Result<(), RelayError> {
        self.forward_packet(key, &record.instruction, mint).await?;
        let record = ForwardRecord {
            ack_error: false,
            ..record
        };
        self.forwards.set(key, &record)
    }

    /// Derive the relay phase for a key from the stored record set.
    pub fn phase(&self, key: &TransferKey) -> Result<RelayPhase, RelayError> {
        let forward = self.forwards.get(key)?;
        let mint = self.mints.get(key)?;
        let in_flight = self
            .in_flight
            .get_all()?
            .iter()
            .any(|packet| packet.transfer_key() == *key);
        Ok(RelayPhase::from_records(
            forward.as_ref(),
            mint.as_ref(),
            in_flight,
        ))
    }

    /// Read access to the forward store (host query surface).
    pub fn forwards(&self) -> &ForwardStore {
        &self.forwards
    }

    /// Read access to the mint store (host query surface).
    pub fn mints(&self) -> &MintStore {
        &self.mints
    }

    /// Read access to the in-flight store (host query surface).
    pub fn in_flight(&self) -> &InFlightStore {
        &self.in_flight
    }
}

#[async_trait]
impl MessageRelayApi for RelayService {
    async fn handle_message(&self, raw: &[u8]) -> Result<(), RelayError> {
        RelayService::handle_message(self, raw).await
    }

    async fn retry(&self, key: &TransferKey) -> Result<(), RelayError> {
        RelayService::retry(self, key).await
    }
}
