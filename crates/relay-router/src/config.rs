//! # Relay Configuration

use serde::{Deserialize, Serialize};

/// Default relative timeout for onward transfers: 10 minutes in nanoseconds.
pub const DEFAULT_TRANSFER_TIMEOUT_NANOS: u64 = 600 * 1_000_000_000;

/// Default upper bound on an envelope body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Relay engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relative timeout applied when a forward instruction carries
    /// `timeout_nanos == 0`.
    pub default_timeout_nanos: u64,

    /// Largest envelope body accepted by `handle_message`.
    pub max_body_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_timeout_nanos: DEFAULT_TRANSFER_TIMEOUT_NANOS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl RelayConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            default_timeout_nanos: 1_000_000_000,
            max_body_bytes: 4 * 1024,
        }
    }
}
