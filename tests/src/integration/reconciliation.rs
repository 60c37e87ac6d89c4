//! End-to-end outcome flows: acknowledgement success, acknowledgement
//! failure with retry, and timeout re-forwarding.

#[cfg(test)]
mod tests {
    use relay_router::{
        encode_acknowledgement, Acknowledgement, PacketKey, PacketLifecycleApi, RelayPhase,
    };

    use crate::support::{burn_envelope, forward_envelope, harness, instruction, key, Harness};

    async fn in_flight_harness() -> Harness {
        let h = harness();
        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();
        h.service
            .handle_message(&burn_envelope(4, 10_000))
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
        h
    }

    fn packet_key(sequence: u64) -> PacketKey {
        PacketKey::new("10", "5", sequence)
    }

    fn success_ack() -> Vec<u8> {
        encode_acknowledgement(&Acknowledgement::Success(vec![0x01])).unwrap()
    }

    fn error_ack(reason: &str) -> Vec<u8> {
        encode_acknowledgement(&Acknowledgement::Error(reason.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_happy_path_ends_idle() {
        let h = in_flight_harness().await;
        h.service
            .on_acknowledgement(&packet_key(0), &success_ack())
            .await
            .unwrap();

        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::Idle);
        assert!(h.service.forwards().get_all().unwrap().is_empty());
        assert!(h.service.mints().get_all().unwrap().is_empty());
        assert!(h.service.in_flight().get_all().unwrap().is_empty());
        assert!(h.next.acks.lock().is_empty());
    }

    #[tokio::test]
    async fn test_ack_failure_then_explicit_retry_then_success() {
        let h = in_flight_harness().await;
        h.service
            .on_acknowledgement(&packet_key(0), &error_ack("destination refused"))
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::Retryable);

        h.service.retry(&key(4)).await.unwrap();
        assert_eq!(h.transfer.call_count(), 2);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);

        // The retry packet carries the next sequence.
        h.service
            .on_acknowledgement(&packet_key(1), &success_ack())
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::Idle);
    }

    #[tokio::test]
    async fn test_ack_failure_then_redelivery_retries() {
        let h = in_flight_harness().await;
        h.service
            .on_acknowledgement(&packet_key(0), &error_ack("refused"))
            .await
            .unwrap();

        // Redelivering the same instruction is the retry signal, not a
        // duplicate.
        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();
        assert_eq!(h.transfer.call_count(), 2);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
    }

    #[tokio::test]
    async fn test_timeout_reissues_transfer() {
        let h = in_flight_harness().await;
        let first = h.transfer.requests.lock()[0].clone();

        h.clock.advance(3_600_000_000_000);
        h.service.on_timeout(&packet_key(0)).await.unwrap();

        // Refund settled below us, then the same transfer went out again
        // with a timeout computed from the current block time.
        assert_eq!(h.next.timeouts.lock().len(), 1);
        assert_eq!(h.transfer.call_count(), 2);
        let second = h.transfer.requests.lock()[1].clone();
        assert_eq!(second.token, first.token);
        assert_eq!(second.receiver, first.receiver);
        assert!(second.timeout_timestamp_nanos > first.timeout_timestamp_nanos);

        let packets = h.service.in_flight().get_all().unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].sequence, 1);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
    }

    #[tokio::test]
    async fn test_foreign_outcomes_pass_through() {
        let h = in_flight_harness().await;
        let foreign = PacketKey::new("channel-9", "transfer", 12);

        h.service
            .on_acknowledgement(&foreign, &success_ack())
            .await
            .unwrap();
        h.service.on_timeout(&foreign).await.unwrap();

        // Delegated untouched; our packet is still tracked.
        assert_eq!(h.next.acks.lock().as_slice(), &[foreign.clone()]);
        assert_eq!(h.next.timeouts.lock().as_slice(), &[foreign]);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
    }

    #[tokio::test]
    async fn test_transfer_outage_spans_retry_attempts() {
        let h = in_flight_harness().await;
        h.service
            .on_acknowledgement(&packet_key(0), &error_ack("refused"))
            .await
            .unwrap();

        h.transfer.set_failure("channel closed");
        assert!(h.service.retry(&key(4)).await.is_err());
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::Retryable);

        h.transfer.clear_failure();
        h.service.retry(&key(4)).await.unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
    }
}
