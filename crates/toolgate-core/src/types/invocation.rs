//! Structured tool invocation parsed from model output

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single tool invocation: dotted tool name plus an argument mapping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolInvocation {
    /// Dotted tool name, e.g. "github.create_branch". The part before the
    /// first dot is the provider namespace. The literal "none" (or a name
    /// without a dot) means the model answered directly instead.
    #[serde(rename = "toolName", alias = "tool_name")]
    pub tool_name: String,
    /// Argument mapping for the call
    pub args: Map<String, Value>,
}

impl ToolInvocation {
    /// Create an invocation with empty arguments
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            args: Map::new(),
        }
    }

    /// Get an argument as a string
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(|v| v.as_str())
    }

    /// Whether this names a real tool (has a namespace and is not the
    /// "none" sentinel)
    pub fn is_dispatchable(&self) -> bool {
        self.tool_name.contains('.') && self.tool_name != "none"
    }
}

/// Split a dotted tool name into (namespace, tool). The split happens at
/// the first dot; both parts must be non-empty.
pub fn split_tool_name(tool_name: &str) -> Option<(&str, &str)> {
    match tool_name.split_once('.') {
        Some((ns, tool)) if !ns.is_empty() && !tool.is_empty() => Some((ns, tool)),
        _ => None,
    }
}
