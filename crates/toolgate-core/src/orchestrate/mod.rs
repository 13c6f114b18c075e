//! Orchestration
//!
//! Composes the model, the intent parser, enrichment and dispatch into one
//! linear per-request flow.

mod orchestrator;

pub use orchestrator::{Orchestrator, Outcome};
