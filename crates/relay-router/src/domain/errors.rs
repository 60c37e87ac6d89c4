//! # Domain Errors
//!
//! Error types for the relay engine, grouped into decode, protocol,
//! propagated, infrastructure, and fatal categories.

use thiserror::Error;

/// Relay error types.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Message envelope too short to contain the fixed header.
    #[error("error decoding message: {got} bytes, need at least {min}")]
    DecodeMessage {
        /// Bytes received
        got: usize,
        /// Minimum header size
        min: usize,
    },

    /// Burn payload has the wrong length.
    #[error("error decoding burn payload: {got} bytes, expected {expected}")]
    DecodeBurnPayload {
        /// Bytes received
        got: usize,
        /// Exact expected size
        expected: usize,
    },

    /// Forward instruction failed schema-checked decoding.
    #[error("error decoding forward instruction: {0}")]
    DecodeForwardInstruction(String),

    /// Acknowledgement envelope failed decoding.
    #[error("error decoding acknowledgement: {0}")]
    DecodeAcknowledgement(String),

    /// Envelope body exceeds the configured size cap.
    #[error("envelope body too large: {got} bytes, cap {max}")]
    BodyTooLarge {
        /// Bytes received
        got: usize,
        /// Configured cap
        max: usize,
    },

    /// A forward instruction for this key is already being processed.
    #[error("previous forward operation still in progress: domain={source_domain}, nonce={nonce}")]
    ForwardInProgress {
        /// Remote source domain
        source_domain: u32,
        /// Message nonce
        nonce: u64,
    },

    /// No local token is registered for the burned remote token.
    #[error("no local token registered for burn from domain {source_domain}")]
    UnknownBurnToken {
        /// Remote source domain
        source_domain: u32,
    },

    /// Explicit retry requested for a key that is not in a retryable state.
    #[error("nothing to retry: domain={source_domain}, nonce={nonce}")]
    NotRetryable {
        /// Remote source domain
        source_domain: u32,
        /// Message nonce
        nonce: u64,
    },

    /// Error propagated verbatim from the transfer service.
    #[error("transfer service error: {0}")]
    Transfer(String),

    /// Key-value store or record serialization failure.
    #[error("store error: {0}")]
    Store(String),

    /// Internal consistency violation. The record set no longer matches what
    /// the state machine guarantees; continuing could double-spend or drop
    /// funds. Callers must abort the surrounding operation.
    #[error("internal consistency violation: {context}")]
    InconsistentState {
        /// Where the violation was detected
        context: String,
    },
}

impl RelayError {
    /// Whether this is a malformed-input decode error.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::DecodeMessage { .. }
                | Self::DecodeBurnPayload { .. }
                | Self::DecodeForwardInstruction(_)
                | Self::DecodeAcknowledgement(_)
                | Self::BodyTooLarge { .. }
        )
    }

    /// Whether this is a protocol error: a legitimate but currently
    /// inadmissible request.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::ForwardInProgress { .. } | Self::UnknownBurnToken { .. } | Self::NotRetryable { .. }
        )
    }

    /// Whether this error is fatal. Fatal errors must never be caught and
    /// retried; the host should halt or alert.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InconsistentState { .. })
    }
}
