//! Top-level façade error taxonomy
//!
//! Every request-handling path converges on `FacadeError` so callers can
//! distinguish expected absence (`ProviderNotFound`) from genuine faults.

use thiserror::Error;

use crate::model::ModelError;
use crate::session::SessionError;

/// Errors surfaced at the request boundary
#[derive(Error, Debug)]
pub enum FacadeError {
    /// A session was used before initialization or after close.
    /// Seeing this is an ordering bug, not a runtime condition.
    #[error("session '{0}' is not ready")]
    SessionNotReady(String),

    /// No provider is registered under this namespace (expected outcome,
    /// the HTTP boundary maps it to 404)
    #[error("tool provider not found: {0}")]
    ProviderNotFound(String),

    /// A tool name that does not split into a namespace and a tool part
    #[error("invalid tool name: {0}")]
    InvalidToolName(String),

    /// The model output did not contain a parseable intent; carries the
    /// raw text for diagnostics
    #[error("malformed intent from model output:\n{raw}")]
    MalformedIntent { raw: String },

    /// A required auxiliary lookup found no match
    #[error("enrichment failed: {0}")]
    EnrichmentFailed(String),

    /// The downstream tool call itself reported failure
    #[error("provider call failed: {0}")]
    ProviderCallFailed(String),

    /// The language-model request failed
    #[error("model request failed: {0}")]
    Model(#[from] ModelError),
}

impl From<SessionError> for FacadeError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotReady(name) => FacadeError::SessionNotReady(name),
            other => FacadeError::ProviderCallFailed(other.to_string()),
        }
    }
}

pub type FacadeResult<T> = Result<T, FacadeError>;
