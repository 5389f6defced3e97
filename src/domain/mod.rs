//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `persona` - Archetype rubric, per-response scoring and aggregation

pub mod foundation;
pub mod persona;
