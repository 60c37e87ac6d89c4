//! Shared harness and message builders for integration tests.

use std::sync::Arc;

use primitive_types::U256;
use relay_router::{
    encode_burn_payload, encode_envelope, encode_forward_instruction, BurnPayload, Bytes32,
    Envelope, FixedClock, ForwardInstruction, MemoryStore, MockTokenPairRegistry,
    MockTransferService, RecordingLifecycle, RelayConfig, RelayDeps, RelayService, TransferKey,
};

/// Default remote domain used by the fixtures.
pub const SOURCE_DOMAIN: u32 = 2;

/// Default sender used by the fixtures.
pub const SENDER: Bytes32 = [0xAA; 32];

/// Default remote token used by the fixtures.
pub const BURN_TOKEN: Bytes32 = [0x07; 32];

/// Default mint recipient used by the fixtures.
pub const MINT_RECIPIENT: Bytes32 = [0x0B; 32];

/// A relay service wired to recording mocks.
pub struct Harness {
    /// The engine under test.
    pub service: RelayService,
    /// Transfer mock; records requests, assigns sequences from 0.
    pub transfer: Arc<MockTransferService>,
    /// Token-pair registry mock.
    pub registry: Arc<MockTokenPairRegistry>,
    /// Pinned block clock.
    pub clock: Arc<FixedClock>,
    /// Next handler in the lifecycle stack.
    pub next: Arc<RecordingLifecycle>,
}

/// Build a harness with `uusdc` registered for the default burn token.
pub fn harness() -> Harness {
    let transfer = Arc::new(MockTransferService::new());
    let registry = Arc::new(MockTokenPairRegistry::new());
    let clock = Arc::new(FixedClock::new(1_700_000_000_000_000_000));
    let next = Arc::new(RecordingLifecycle::new());
    registry.register(SOURCE_DOMAIN, BURN_TOKEN, "uusdc");

    let service = RelayService::new(
        RelayConfig::default(),
        RelayDeps {
            store: Arc::new(MemoryStore::new()),
            transfer: transfer.clone(),
            registry: registry.clone(),
            clock: clock.clone(),
            next: next.clone(),
        },
    );

    Harness {
        service,
        transfer,
        registry,
        clock,
        next,
    }
}

/// Default forward instruction: port "5", channel "10", engine-default
/// timeout.
pub fn instruction() -> ForwardInstruction {
    ForwardInstruction {
        port: "5".to_string(),
        channel: "10".to_string(),
        destination_receiver: "cosmos1receiver".to_string(),
        memo: String::new(),
        timeout_nanos: 0,
    }
}

/// Wrap a body in an envelope from the default sender.
pub fn envelope_with_body(nonce: u64, body: Vec<u8>) -> Vec<u8> {
    encode_envelope(&Envelope {
        version: 0,
        source_domain: SOURCE_DOMAIN,
        destination_domain: 0,
        nonce,
        sender: SENDER,
        recipient: [0u8; 32],
        destination_caller: [0u8; 32],
        body,
    })
}

/// Envelope carrying a forward instruction.
pub fn forward_envelope(nonce: u64, instruction: &ForwardInstruction) -> Vec<u8> {
    envelope_with_body(nonce, encode_forward_instruction(instruction).unwrap())
}

/// Envelope carrying a burn payload for the default token and sender.
pub fn burn_envelope(nonce: u64, amount: u64) -> Vec<u8> {
    envelope_with_body(
        nonce,
        encode_burn_payload(&BurnPayload {
            version: 0,
            burn_token: BURN_TOKEN,
            mint_recipient: MINT_RECIPIENT,
            amount: U256::from(amount),
            message_sender: SENDER,
        }),
    )
}

/// Correlation key for the default sender.
pub fn key(nonce: u64) -> TransferKey {
    TransferKey::new(SOURCE_DOMAIN, SENDER, nonce)
}
