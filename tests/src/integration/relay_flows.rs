//! Correlation and dispatch flows: both arrival orders, duplicates, and
//! key independence.

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use relay_router::{
        encode_burn_payload, BlockTimeSource, BurnPayload, Coin, RelayError, RelayPhase,
        DEFAULT_TRANSFER_TIMEOUT_NANOS,
    };

    use crate::support::{
        burn_envelope, envelope_with_body, forward_envelope, harness, instruction, key,
        MINT_RECIPIENT, SENDER,
    };

    #[tokio::test]
    async fn test_full_relay_scenario() {
        let h = harness();

        // Forward instruction for nonce 4 arrives first.
        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::WaitingMint);
        assert_eq!(h.transfer.call_count(), 0);

        // Mint notification for the same key completes the pair.
        h.service
            .handle_message(&burn_envelope(4, 10_000))
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
        assert_eq!(h.transfer.call_count(), 1);

        let request = h.transfer.requests.lock()[0].clone();
        assert_eq!(request.port_id, "5");
        assert_eq!(request.channel_id, "10");
        assert_eq!(request.token, Coin::new("uusdc", U256::from(10_000u64)));
        assert_eq!(request.sender, MINT_RECIPIENT);
        assert_eq!(request.receiver, "cosmos1receiver");
        assert_eq!(
            request.timeout_timestamp_nanos,
            h.clock.block_time_nanos() + DEFAULT_TRANSFER_TIMEOUT_NANOS
        );

        // First transfer from the mock gets sequence 0.
        let packets = h.service.in_flight().get_all().unwrap();
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].channel_id, "10");
        assert_eq!(packets[0].port_id, "5");
        assert_eq!(packets[0].sequence, 0);
        assert_eq!(packets[0].transfer_key(), key(4));
    }

    #[tokio::test]
    async fn test_arrival_order_is_symmetric() {
        let h = harness();
        h.service
            .handle_message(&burn_envelope(4, 10_000))
            .await
            .unwrap();
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::WaitingForward);

        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();
        assert_eq!(h.transfer.call_count(), 1);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::InFlight);
    }

    #[tokio::test]
    async fn test_keys_progress_independently() {
        let h = harness();

        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();
        h.service
            .handle_message(&burn_envelope(5, 2_500))
            .await
            .unwrap();

        // Neither key has its counterpart yet.
        assert_eq!(h.transfer.call_count(), 0);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::WaitingMint);
        assert_eq!(h.service.phase(&key(5)).unwrap(), RelayPhase::WaitingForward);

        // Completing key 5 does not touch key 4.
        h.service
            .handle_message(&forward_envelope(5, &instruction()))
            .await
            .unwrap();
        assert_eq!(h.transfer.call_count(), 1);
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::WaitingMint);
        assert_eq!(h.service.phase(&key(5)).unwrap(), RelayPhase::InFlight);
        assert_eq!(
            h.transfer.requests.lock()[0].token,
            Coin::new("uusdc", U256::from(2_500u64))
        );
    }

    #[tokio::test]
    async fn test_duplicate_instruction_rejected_while_pending() {
        let h = harness();
        h.service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap();

        let err = h
            .service
            .handle_message(&forward_envelope(4, &instruction()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RelayError::ForwardInProgress {
                source_domain: 2,
                nonce: 4
            }
        ));
        assert!(err.is_protocol());
    }

    #[tokio::test]
    async fn test_explicit_timeout_and_memo_carried_through() {
        let h = harness();
        let mut instruction = instruction();
        instruction.timeout_nanos = 42_000_000_000;
        instruction.memo = "hop-2".to_string();

        h.service
            .handle_message(&burn_envelope(4, 10_000))
            .await
            .unwrap();
        h.service
            .handle_message(&forward_envelope(4, &instruction))
            .await
            .unwrap();

        let request = h.transfer.requests.lock()[0].clone();
        assert_eq!(
            request.timeout_timestamp_nanos,
            h.clock.block_time_nanos() + 42_000_000_000
        );
        assert_eq!(request.memo, "hop-2");
    }

    #[tokio::test]
    async fn test_unknown_burn_token_leaves_no_state() {
        let h = harness();
        let raw = envelope_with_body(
            4,
            encode_burn_payload(&BurnPayload {
                version: 0,
                burn_token: [0x99; 32],
                mint_recipient: MINT_RECIPIENT,
                amount: U256::from(10_000u64),
                message_sender: SENDER,
            }),
        );

        let err = h.service.handle_message(&raw).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::UnknownBurnToken { source_domain: 2 }
        ));
        assert!(h.service.mints().get(&key(4)).unwrap().is_none());
        assert_eq!(h.service.phase(&key(4)).unwrap(), RelayPhase::Idle);
    }

    #[tokio::test]
    async fn test_truncated_envelope_rejected() {
        let h = harness();
        let raw = forward_envelope(4, &instruction());
        let err = h.service.handle_message(&raw[..80]).await.unwrap_err();
        assert!(err.is_decode());
    }
}
