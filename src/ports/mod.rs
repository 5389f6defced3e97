//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ClassificationRepository` - Persistence of classification history per subject

mod classification_repository;

pub use classification_repository::{ClassificationRecord, ClassificationRepository};
