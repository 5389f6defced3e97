//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process classification storage

pub mod memory;

pub use memory::InMemoryClassificationRepository;
