//! Request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Explicit tool call request
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub tool_name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

/// Free-text orchestration request
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    pub text: String,
}

/// Success envelope
#[derive(Debug, Clone, Serialize)]
pub struct ResultBody {
    pub status: &'static str,
    pub result: Value,
}

impl ResultBody {
    pub fn ok(result: Value) -> Self {
        Self {
            status: "ok",
            result,
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
