//! # Adapters
//!
//! Concrete implementations of outbound ports.

pub mod memory;

pub use memory::MemoryStore;
