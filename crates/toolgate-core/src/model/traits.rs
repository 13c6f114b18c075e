//! Chat model trait and errors

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during model requests
#[derive(Error, Debug)]
pub enum ModelError {
    /// No API key in the configured environment variable
    #[error("API key is required (set {env})")]
    MissingApiKey { env: String },

    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A text-completion model
///
/// One request, one free-text answer; the orchestrator treats the call as
/// opaque. Implementations: `OpenRouterModel` for production, `MockModel`
/// for tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete a chat with one system instruction and one user message
    async fn complete(&self, system: &str, user: &str) -> ModelResult<String>;
}
