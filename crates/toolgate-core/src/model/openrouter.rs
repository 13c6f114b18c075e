//! OpenRouter chat-completions client
//!
//! OpenAI-compatible endpoint; one non-streaming request per orchestration.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::traits::{ChatModel, ModelError, ModelResult};
use crate::config::ModelSettings;
use crate::logging::Logger;

/// Chat model backed by the OpenRouter API
pub struct OpenRouterModel {
    settings: ModelSettings,
    client: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl OpenRouterModel {
    /// Create a client from model settings
    pub fn new(settings: ModelSettings, logger: Arc<dyn Logger>) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
            logger,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatModel for OpenRouterModel {
    async fn complete(&self, system: &str, user: &str) -> ModelResult<String> {
        let api_key = self.settings.api_key().ok_or_else(|| ModelError::MissingApiKey {
            env: self.settings.api_key_env.clone(),
        })?;

        let payload = json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": self.settings.temperature,
        });

        self.logger.info(&format!(
            "[OpenRouterModel] Requesting completion from '{}'",
            self.settings.model
        ));

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .header("HTTP-Referer", "https://github.com/toolgate/toolgate")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ModelError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_completions_url_joins_cleanly() {
        let settings = ModelSettings {
            api_base: "https://openrouter.ai/api/v1/".to_string(),
            ..Default::default()
        };
        let model = OpenRouterModel::new(settings, Arc::new(NoOpLogger::new()));
        assert_eq!(
            model.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let settings = ModelSettings {
            api_key_env: "TOOLGATE_TEST_NO_SUCH_KEY".to_string(),
            ..Default::default()
        };
        let model = OpenRouterModel::new(settings, Arc::new(NoOpLogger::new()));

        let result = model.complete("system", "user").await;
        assert!(matches!(result, Err(ModelError::MissingApiKey { .. })));
    }
}
