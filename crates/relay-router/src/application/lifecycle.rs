//! # Outcome Reconciliation
//!
//! Acknowledgement and timeout handling for tracked packets. Outcomes for
//! packets the engine does not track are delegated to the next handler in
//! the stack.

use async_trait::async_trait;

use crate::codec;
use crate::domain::{
    invariant_retry_records_present, Acknowledgement, PacketKey, RelayError, TransferKey,
};
use crate::ports::PacketLifecycleApi;

use super::service::RelayService;

impl RelayService {
    /// Success path: the three records for the key leave together, as one
    /// state transition.
    fn clear_transfer(&self, transfer_key: &TransferKey, packet_key: &PacketKey) -> Result<(), RelayError> {
        self.mints.delete(transfer_key)?;
        self.forwards.delete(transfer_key)?;
        self.in_flight.delete(packet_key)?;
        Ok(())
    }
}

#[async_trait]
impl PacketLifecycleApi for RelayService {
    async fn on_acknowledgement(&self, key: &PacketKey, ack: &[u8]) -> Result<(), RelayError> {
        let Some(packet) = self.in_flight.get(key)? else {
            // Not this engine's packet.
            return self.next.on_acknowledgement(key, ack).await;
        };

        let ack = codec::decode_acknowledgement(ack)?;
        let transfer_key = packet.transfer_key();

        match ack {
            Acknowledgement::Success(_) => {
                self.clear_transfer(&transfer_key, key)?;
                tracing::info!(
                    source_domain = transfer_key.source_domain,
                    nonce = transfer_key.nonce,
                    sequence = key.sequence,
                    "onward transfer acknowledged, records cleared"
                );
                Ok(())
            }
            Acknowledgement::Error(reason) => {
                self.in_flight.delete(key)?;
                let (mut record, _mint) = invariant_retry_records_present(
                    self.forwards.get(&transfer_key)?,
                    self.mints.get(&transfer_key)?,
                    &transfer_key,
                )?;
                record.ack_error = true;
                self.forwards.set(&transfer_key, &record)?;
                tracing::warn!(
                    source_domain = transfer_key.source_domain,
                    nonce = transfer_key.nonce,
                    sequence = key.sequence,
                    reason = %reason,
                    "onward transfer acknowledged with error, awaiting retry"
                );
                Ok(())
            }
        }
    }

    async fn on_timeout(&self, key: &PacketKey) -> Result<(), RelayError> {
        let Some(packet) = self.in_flight.get(key)? else {
            return self.next.on_timeout(key).await;
        };

        self.in_flight.delete(key)?;
        // Refund on this chain settles before the packet is re-sent.
        self.next.on_timeout(key).await?;

        let transfer_key = packet.transfer_key();
        let (record, mint) = invariant_retry_records_present(
            self.forwards.get(&transfer_key)?,
            self.mints.get(&transfer_key)?,
            &transfer_key,
        )?;
        tracing::info!(
            source_domain = transfer_key.source_domain,
            nonce = transfer_key.nonce,
            sequence = key.sequence,
            "onward transfer timed out, re-forwarding"
        );
        self.forward_packet(&transfer_key, &record.instruction, &mint)
            .await
    }
}
