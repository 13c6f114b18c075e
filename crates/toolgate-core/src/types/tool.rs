//! Tool catalogue and result types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description of one tool offered by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name as the provider reports it (no namespace prefix)
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the tool's input parameters
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Create a new descriptor
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Value::Object(Default::default()),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Result of one tool call
///
/// The payload is provider-defined and kept opaque in `raw`; the textual
/// sub-content is extracted separately because enrichment decodes secondary
/// JSON out of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The full result payload as the provider returned it
    pub raw: Value,
    /// Text parts of the result content, in order
    pub text: Vec<String>,
    /// Whether the provider flagged the result as an error
    pub is_error: bool,
}

impl ToolOutput {
    /// Build an output holding only text content
    pub fn from_text_parts(parts: impl IntoIterator<Item = String>) -> Self {
        let text: Vec<String> = parts.into_iter().collect();
        Self {
            raw: Value::Null,
            text,
            is_error: false,
        }
    }

    /// All text parts joined with newlines
    pub fn joined_text(&self) -> String {
        self.text.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_text() {
        let output = ToolOutput::from_text_parts(["a".to_string(), "b".to_string()]);
        assert_eq!(output.joined_text(), "a\nb");
        assert!(!output.is_error);
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = ToolDescriptor::new("list_branches", "List branches")
            .with_schema(serde_json::json!({"type": "object"}));
        assert_eq!(desc.name, "list_branches");
        assert_eq!(desc.input_schema["type"], "object");
    }
}
