//! Mock model for testing
//!
//! Deterministic responses without network dependencies.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::{ChatModel, ModelError, ModelResult};

/// Mock response mode
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Echo back the user message
    Echo,
    /// Return a fixed response
    Fixed(String),
    /// Fail with an error message
    Error(String),
}

/// Mock chat model
pub struct MockModel {
    mode: MockMode,
    /// (system, user) pairs seen by the mock
    requests: Mutex<Vec<(String, String)>>,
}

impl MockModel {
    /// Create an echo model
    pub fn echo() -> Self {
        Self {
            mode: MockMode::Echo,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a fixed-response model
    pub fn fixed(response: impl Into<String>) -> Self {
        Self {
            mode: MockMode::Fixed(response.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create an error-producing model
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            mode: MockMode::Error(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// System instructions the mock has seen
    pub fn seen_systems(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(s, _)| s.clone()).collect()
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn complete(&self, system: &str, user: &str) -> ModelResult<String> {
        self.requests
            .lock()
            .push((system.to_string(), user.to_string()));
        match &self.mode {
            MockMode::Echo => Ok(user.to_string()),
            MockMode::Fixed(response) => Ok(response.clone()),
            MockMode::Error(message) => Err(ModelError::InvalidResponse(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_mode() {
        let model = MockModel::fixed("canned");
        assert_eq!(model.complete("s", "u").await.unwrap(), "canned");
        assert_eq!(model.seen_systems(), ["s"]);
    }

    #[tokio::test]
    async fn test_error_mode() {
        let model = MockModel::error("boom");
        assert!(model.complete("s", "u").await.is_err());
    }
}
