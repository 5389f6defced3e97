//! In-memory adapters for tests and single-process use.

mod in_memory_classification_repository;

pub use in_memory_classification_repository::InMemoryClassificationRepository;
