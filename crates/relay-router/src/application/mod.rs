//! # Application Layer
//!
//! The relay service and its outcome-reconciliation half.

pub mod lifecycle;
pub mod service;

pub use service::{RelayDeps, RelayService};
