//! Tool registry for the MCP surface
//!
//! A registry pattern instead of one large match on tool names: every
//! tool implements [`McpTool`] and registers itself, and the server
//! dispatches by lookup.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;

use crate::client::CanvasClient;
use crate::config::Config;

/// Context shared by all tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// The Canvas client every tool queries through
    pub client: Arc<CanvasClient>,
    /// Runtime configuration (default student, base URL)
    pub config: Config,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(client: Arc<CanvasClient>, config: Config) -> Self {
        Self { client, config }
    }
}

/// Interface every MCP tool implements.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// The tool's name as exposed to clients
    fn name(&self) -> &'static str;

    /// One-line description shown in tool listings
    fn description(&self) -> &'static str;

    /// JSON schema of the tool's arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry of MCP tools, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool.
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Look up a tool by name.
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Names of all registered tools.
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// All registered tools as `Tool` descriptors for the list_tools
    /// response.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Shared helpers for tool implementations.
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse a tool's argument map into a typed request struct.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_request(format!("Invalid arguments: {e}"), None))
    }

    /// Build a success response carrying text content.
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Build an error response carrying the error message as text.
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };

        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent { text: error_text }),
                None,
            )],
            is_error: Some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct SampleArgs {
        student_id: Option<String>,
        days: Option<i64>,
    }

    #[test]
    fn parse_arguments_accepts_typed_and_missing_fields() {
        let mut args = serde_json::Map::new();
        args.insert("student_id".to_string(), serde_json::json!("1234"));
        let parsed: SampleArgs = BaseToolImpl::parse_arguments(args).unwrap();
        assert_eq!(parsed.student_id.as_deref(), Some("1234"));
        assert_eq!(parsed.days, None);

        let parsed: SampleArgs = BaseToolImpl::parse_arguments(serde_json::Map::new()).unwrap();
        assert!(parsed.student_id.is_none());
    }

    #[test]
    fn parse_arguments_rejects_wrong_types() {
        let mut args = serde_json::Map::new();
        args.insert("days".to_string(), serde_json::json!("not a number"));
        let result: std::result::Result<SampleArgs, _> = BaseToolImpl::parse_arguments(args);
        assert!(result.is_err());
    }

    #[test]
    fn responses_carry_the_error_flag() {
        let ok = BaseToolImpl::create_success_response("[]");
        assert_eq!(ok.is_error, Some(false));

        let err = BaseToolImpl::create_error_response("upstream failure", Some("403".to_string()));
        assert_eq!(err.is_error, Some(true));
    }
}
