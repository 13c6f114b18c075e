//! Argument enrichment
//!
//! Provider-specific rules that fill in required identifiers a human or
//! model would omit, by performing auxiliary lookups before the primary
//! call is dispatched. This is a fixed set of `(tool, missing field)`
//! rules, not a rule engine; each rule decides independently whether it
//! applies.

mod github;
mod slack;

use serde_json::Value;

use crate::dispatch::ToolDispatch;
use crate::error::FacadeResult;
use crate::logging::Logger;
use crate::types::{ToolInvocation, ToolOutput};

pub use github::enrich_create_branch;
pub use slack::resolve_channel;

/// Apply every enrichment rule whose trigger matches the invocation
pub async fn enrich(
    invocation: &mut ToolInvocation,
    dispatch: &dyn ToolDispatch,
    logger: &dyn Logger,
) -> FacadeResult<()> {
    enrich_create_branch(invocation, dispatch, logger).await?;
    resolve_channel(invocation, dispatch, logger).await?;
    Ok(())
}

/// Decode a JSON array embedded in the textual sub-content of a tool
/// result, keyed by `key`, collecting across text parts.
///
/// A malformed part is logged and yields no items at all, which downstream
/// reads as "no matches". The original service behaved this way for branch
/// lists; we apply the same permissive reading to channels (see DESIGN.md).
fn decode_embedded_list(output: &ToolOutput, key: &str, logger: &dyn Logger) -> Vec<Value> {
    let mut items = Vec::new();
    for text in &output.text {
        match serde_json::from_str::<Value>(text) {
            Ok(parsed) => {
                if let Some(found) = parsed.get(key).and_then(|v| v.as_array()) {
                    items.extend(found.iter().cloned());
                }
            }
            Err(e) => {
                logger.error(&format!(
                    "[Enrich] Malformed embedded payload while reading '{}': {}",
                    key, e
                ));
                return Vec::new();
            }
        }
    }
    items
}

/// Decode a single string field embedded in the textual sub-content of a
/// tool result. Same permissive handling of malformed parts.
fn decode_embedded_str(output: &ToolOutput, key: &str, logger: &dyn Logger) -> Option<String> {
    for text in &output.text {
        match serde_json::from_str::<Value>(text) {
            Ok(parsed) => {
                if let Some(value) = parsed.get(key).and_then(|v| v.as_str()) {
                    return Some(value.to_string());
                }
            }
            Err(e) => {
                logger.error(&format!(
                    "[Enrich] Malformed embedded payload while reading '{}': {}",
                    key, e
                ));
                return None;
            }
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared stub dispatcher for enrichment and orchestrator tests

    use std::collections::HashMap;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::Value;

    use crate::dispatch::ToolDispatch;
    use crate::error::{FacadeError, FacadeResult};
    use crate::types::ToolOutput;

    /// Dispatcher returning canned outputs per dotted tool name and
    /// recording every call it receives
    #[derive(Default)]
    pub struct StubDispatch {
        responses: HashMap<String, ToolOutput>,
        pub calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubDispatch {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to `tool_name` with a result whose content is one text
        /// part holding `payload` serialized as JSON
        pub fn with_json_text(mut self, tool_name: &str, payload: Value) -> Self {
            self.responses.insert(
                tool_name.to_string(),
                ToolOutput::from_text_parts([payload.to_string()]),
            );
            self
        }

        /// Respond to `tool_name` with literal text parts
        pub fn with_text_parts(mut self, tool_name: &str, parts: Vec<String>) -> Self {
            self.responses
                .insert(tool_name.to_string(), ToolOutput::from_text_parts(parts));
            self
        }

        pub fn called_tools(&self) -> Vec<String> {
            self.calls.lock().iter().map(|(name, _)| name.clone()).collect()
        }
    }

    #[async_trait]
    impl ToolDispatch for StubDispatch {
        async fn dispatch(&self, tool_name: &str, args: Value) -> FacadeResult<ToolOutput> {
            self.calls.lock().push((tool_name.to_string(), args));
            self.responses
                .get(tool_name)
                .cloned()
                .ok_or_else(|| FacadeError::ProviderNotFound(tool_name.to_string()))
        }

        async fn catalogue(&self) -> FacadeResult<Vec<String>> {
            let mut names: Vec<String> = self.responses.keys().cloned().collect();
            names.sort();
            Ok(names)
        }
    }
}
