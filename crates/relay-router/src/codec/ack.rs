//! Codec for transfer acknowledgements.
//!
//! The transfer service reports outcomes in a JSON envelope carrying exactly
//! one of `result` (hex-encoded opaque payload) or `error`.

use serde::{Deserialize, Serialize};

use crate::domain::{Acknowledgement, RelayError};

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AckEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Decode an acknowledgement from raw bytes.
pub fn decode_acknowledgement(raw: &[u8]) -> Result<Acknowledgement, RelayError> {
    let envelope: AckEnvelope =
        serde_json::from_slice(raw).map_err(|e| RelayError::DecodeAcknowledgement(e.to_string()))?;
    match (envelope.result, envelope.error) {
        (Some(result), None) => {
            let payload = hex::decode(&result)
                .map_err(|e| RelayError::DecodeAcknowledgement(e.to_string()))?;
            Ok(Acknowledgement::Success(payload))
        }
        (None, Some(error)) => Ok(Acknowledgement::Error(error)),
        _ => Err(RelayError::DecodeAcknowledgement(
            "acknowledgement must carry exactly one of result or error".to_string(),
        )),
    }
}

/// Encode an acknowledgement to raw bytes. Mirrors [`decode_acknowledgement`].
pub fn encode_acknowledgement(ack: &Acknowledgement) -> Result<Vec<u8>, RelayError> {
    let envelope = match ack {
        Acknowledgement::Success(payload) => AckEnvelope {
            result: Some(hex::encode(payload)),
            error: None,
        },
        Acknowledgement::Error(reason) => AckEnvelope {
            result: None,
            error: Some(reason.clone()),
        },
    };
    serde_json::to_vec(&envelope).map_err(|e| RelayError::Store(e.to_string()))
}
