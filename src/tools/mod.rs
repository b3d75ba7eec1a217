//! Tool System - capabilities the comparison agent may invoke
//!
//! Information Hiding:
//! - Tool execution details hidden behind trait
//! - Tool parameters and schemas hidden in implementations
//! - Fetch and extraction errors internalized per tool

pub mod registry;
pub mod web_scrape;

use crate::core::llm::{FunctionDefinition, ToolDefinition};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Tool parameter schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub param_type: String,
    pub description: String,
    pub required: bool,
}

/// Tool metadata - describes what the tool does and how to use it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ToolParameter>,
}

impl ToolMetadata {
    /// Function-calling definition with a JSON Schema object for the parameters
    pub fn to_definition(&self) -> ToolDefinition {
        let mut properties = Map::new();
        for p in &self.parameters {
            properties.insert(
                p.name.clone(),
                json!({"type": p.param_type, "description": p.description}),
            );
        }

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name.clone(),
                description: self.description.clone(),
                parameters: json!({
                    "type": "object",
                    "properties": Value::Object(properties),
                    "required": required,
                }),
            },
        }
    }
}

/// Result of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
        }
    }

    /// Text handed back to the model. Failures are reported verbatim so the
    /// model sees them the same way it sees regular output.
    pub fn observation(&self) -> String {
        if self.success {
            self.output.clone()
        } else {
            self.error.clone().unwrap_or_default()
        }
    }
}

/// Tool trait - All tools must implement this
///
/// Information Hiding: Tool implementations hide their internal execution logic,
/// data structures, and error handling strategies behind this interface.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool metadata (name, description, parameters)
    fn metadata(&self) -> ToolMetadata;

    /// Execute the tool with given arguments
    ///
    /// # Arguments
    /// * `args` - JSON value containing tool arguments
    ///
    /// # Returns
    /// * `ToolResult` - Success or failure with output/error
    async fn execute(&self, args: Value) -> Result<ToolResult>;

    /// Validate arguments before execution (optional)
    fn validate(&self, _args: &Value) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_lists_required_parameters() {
        let metadata = ToolMetadata {
            name: "lookup".to_string(),
            description: "Look something up".to_string(),
            parameters: vec![
                ToolParameter {
                    name: "query".to_string(),
                    param_type: "string".to_string(),
                    description: "What to look up".to_string(),
                    required: true,
                },
                ToolParameter {
                    name: "limit".to_string(),
                    param_type: "integer".to_string(),
                    description: "Max results".to_string(),
                    required: false,
                },
            ],
        };

        let definition = metadata.to_definition();
        assert_eq!(definition.tool_type, "function");
        assert_eq!(definition.function.name, "lookup");
        assert_eq!(definition.function.parameters["properties"]["query"]["type"], "string");
        assert_eq!(definition.function.parameters["required"], json!(["query"]));
    }

    #[test]
    fn test_failure_observation_is_error_text() {
        let result = ToolResult::failure("Failed to fetch the URL: boom");
        assert_eq!(result.observation(), "Failed to fetch the URL: boom");

        let result = ToolResult::success("Heading: x");
        assert_eq!(result.observation(), "Heading: x");
    }
}
