//! Persona Rubric - rule-based behavioral persona classification
//!
//! This crate classifies a subject into one or more of five archetypes
//! (Analítico, Emotivo, Pragmático, Criativo, Inseguro) from questionnaire
//! answers and optional typing telemetry, using a versioned scoring rubric.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
