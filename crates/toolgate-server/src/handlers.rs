//! Request handlers
//!
//! Thin wrappers mapping routes onto core operations; every error is
//! logged here at the boundary and surfaced as a structured failure body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use toolgate_core::{FacadeError, Logger, Orchestrator, SessionRegistry, ToolInvocation};

use crate::models::{ErrorBody, PromptRequest, ResultBody, ToolRequest};

/// Shared state behind every route
pub struct ApiState {
    pub registry: Arc<SessionRegistry>,
    pub orchestrator: Arc<Orchestrator>,
    pub logger: Arc<dyn Logger>,
}

/// Error wrapper carrying the façade taxonomy into HTTP statuses
pub struct ApiError(FacadeError);

impl From<FacadeError> for ApiError {
    fn from(err: FacadeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FacadeError::ProviderNotFound(_) => StatusCode::NOT_FOUND,
            FacadeError::InvalidToolName(_) | FacadeError::MalformedIntent { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl ApiState {
    fn fail(&self, err: FacadeError) -> ApiError {
        self.logger
            .error(&format!("[Api] Request failed: {}", err));
        ApiError(err)
    }
}

/// Liveness banner
pub async fn root() -> Json<Value> {
    Json(serde_json::json!({ "message": "Toolgate online" }))
}

/// List tool names for one provider
pub async fn get_tools(
    State(state): State<Arc<ApiState>>,
    Path(provider): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let session = state.registry.get(&provider).map_err(|e| state.fail(e))?;
    let tools = session
        .list_tools()
        .await
        .map_err(|e| state.fail(e.into()))?;
    let names: Vec<String> = tools.into_iter().map(|t| t.name).collect();
    Ok(Json(serde_json::json!(names)))
}

/// Run a named tool on one provider (tool name is provider-local)
pub async fn run_tool(
    State(state): State<Arc<ApiState>>,
    Path(provider): Path<String>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<ResultBody>, ApiError> {
    let session = state.registry.get(&provider).map_err(|e| state.fail(e))?;
    let output = session
        .call_tool(&request.tool_name, Value::Object(request.args))
        .await
        .map_err(|e| state.fail(e.into()))?;
    let result = serde_json::to_value(&output).unwrap_or(Value::Null);
    Ok(Json(ResultBody::ok(result)))
}

/// Orchestrate from free text
pub async fn orchestrate_from_prompt(
    State(state): State<Arc<ApiState>>,
    Json(prompt): Json<PromptRequest>,
) -> Result<Json<ResultBody>, ApiError> {
    state
        .logger
        .info(&format!("[Api] Prompt received: {}", prompt.text));
    let outcome = state
        .orchestrator
        .orchestrate(&prompt.text)
        .await
        .map_err(|e| state.fail(e))?;
    let result = serde_json::to_value(&outcome).unwrap_or(Value::Null);
    Ok(Json(ResultBody::ok(result)))
}

/// Orchestrate from an explicit tool name and arguments (no model call,
/// but enrichment still applies)
pub async fn orchestrate_explicit(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<ToolRequest>,
) -> Result<Json<ResultBody>, ApiError> {
    state.logger.info(&format!(
        "[Api] Direct execution: {} with args: {}",
        request.tool_name,
        Value::Object(request.args.clone())
    ));
    let invocation = ToolInvocation {
        tool_name: request.tool_name,
        args: request.args,
    };
    let outcome = state
        .orchestrator
        .run(invocation)
        .await
        .map_err(|e| state.fail(e))?;
    let result = serde_json::to_value(&outcome).unwrap_or(Value::Null);
    Ok(Json(ResultBody::ok(result)))
}
