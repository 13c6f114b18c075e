//! Dispatch seam for dotted tool names
//!
//! Both the orchestrator's primary call and the enricher's auxiliary
//! lookups go through this trait; the session registry is the production
//! implementation, tests stub it.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FacadeResult;
use crate::types::ToolOutput;

/// Dispatch a dotted `namespace.tool` call to whichever provider owns the
/// namespace
#[async_trait]
pub trait ToolDispatch: Send + Sync {
    /// Forward one call
    async fn dispatch(&self, tool_name: &str, args: Value) -> FacadeResult<ToolOutput>;

    /// Every dispatchable tool, as dotted names
    async fn catalogue(&self) -> FacadeResult<Vec<String>>;
}
