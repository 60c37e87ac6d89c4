//! Cross-component relay flows exercised through the public API.

pub mod reconciliation;
pub mod relay_flows;
