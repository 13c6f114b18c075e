//! Free-text orchestration
//!
//! Linear flow per request: query the model with the current tool
//! catalogue, parse its answer into an invocation, enrich, dispatch.
//! Any stage error aborts the request with that stage's error.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::ToolDispatch;
use crate::error::FacadeResult;
use crate::enrich::enrich;
use crate::intent::parse_intent;
use crate::logging::Logger;
use crate::model::ChatModel;
use crate::types::{ToolInvocation, ToolOutput};

/// Fallback when the model answers directly but supplies no message
const DEFAULT_REPLY: &str = "Sorry, I don't know how to help with that yet.";

/// Result of one orchestrated request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The model answered directly; nothing was dispatched
    Reply(String),
    /// A tool was dispatched and returned this output
    Tool(ToolOutput),
}

/// Orchestrator over a model and a dispatcher
pub struct Orchestrator {
    dispatch: Arc<dyn ToolDispatch>,
    model: Arc<dyn ChatModel>,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    pub fn new(
        dispatch: Arc<dyn ToolDispatch>,
        model: Arc<dyn ChatModel>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            dispatch,
            model,
            logger,
        }
    }

    /// Orchestrate from free text: ask the model which tool to run, then
    /// run it. A tool name without a namespace separator, or the literal
    /// "none", is a direct textual answer.
    pub async fn orchestrate(&self, prompt: &str) -> FacadeResult<Outcome> {
        self.logger
            .info(&format!("[Orchestrator] Prompt received: {}", prompt));

        let catalogue = self.dispatch.catalogue().await?;
        let system = system_prompt(&catalogue);

        let content = self.model.complete(&system, prompt).await?;
        self.logger
            .info(&format!("[Orchestrator] Raw model reply:\n{}", content));

        let invocation = parse_intent(&content)?;

        if !invocation.is_dispatchable() {
            let message = invocation
                .arg_str("message")
                .unwrap_or(DEFAULT_REPLY)
                .to_string();
            return Ok(Outcome::Reply(message));
        }

        self.logger.info(&format!(
            "[Orchestrator] Tool requested: {} with args: {}",
            invocation.tool_name,
            Value::Object(invocation.args.clone())
        ));

        self.run(invocation).await
    }

    /// Enrich and dispatch an explicit invocation (no model involved)
    pub async fn run(&self, mut invocation: ToolInvocation) -> FacadeResult<Outcome> {
        enrich(
            &mut invocation,
            self.dispatch.as_ref(),
            self.logger.as_ref(),
        )
        .await?;

        let output = self
            .dispatch
            .dispatch(&invocation.tool_name, Value::Object(invocation.args))
            .await?;

        Ok(Outcome::Tool(output))
    }
}

/// System instruction with the current tool catalogue interpolated
fn system_prompt(catalogue: &[String]) -> String {
    let tool_list = catalogue
        .iter()
        .map(|tool| format!("- {}", tool))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a DevOps assistant. Based on the user's request, respond ONLY with a valid JSON object in this format:\n\
         {{\"toolName\": \"<namespace.tool_name>\", \"args\": {{ ... }}}}\n\
         DO NOT explain, just respond with valid JSON.\n\
         Available tools:\n{}",
        tool_list
    )
}
