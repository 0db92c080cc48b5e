//! Validation engine module.
//!
//! Provides the scene rules, outcome accumulation, and run orchestration.

pub mod orchestrator;
pub mod result;
pub mod rules;
