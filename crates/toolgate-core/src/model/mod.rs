//! Language-model clients
//!
//! The orchestrator only needs one text completion per request, so the
//! surface is a single `ChatModel` trait. `OpenRouterModel` talks to an
//! OpenAI-compatible endpoint; `MockModel` serves tests.

mod traits;
mod openrouter;
mod mock;

pub use traits::{ChatModel, ModelError, ModelResult};
pub use openrouter::OpenRouterModel;
pub use mock::{MockModel, MockMode};
