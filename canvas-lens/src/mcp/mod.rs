//! MCP server exposing the aggregation services as read-only tools,
//! plus a set of built-in prompts
//!
//! Every tool wraps one service call and returns its result as pretty
//! JSON text. Service errors come back as `CallToolResult` error text
//! rather than protocol errors, so assistants can read and relay them.
//! Prompts are canned multi-tool workflows; see [`prompts`].

pub mod prompts;
pub mod tool_registry;
pub mod tools;

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
    InitializeRequestParam, InitializeResult, ListPromptsResult, ListToolsResult,
    PaginatedRequestParam, PromptsCapability, ProtocolVersion, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};

use crate::client::CanvasClient;
use crate::config::Config;
use crate::error::Result;

pub use prompts::PromptRegistry;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};

const SERVER_INSTRUCTIONS: &str = "Read-only access to a student's Canvas LMS data: courses and \
grades, missing and unsubmitted work, upcoming assignments, recent grades and teacher feedback, \
announcements, inbox, calendar events, and discussions. Pass student_id to query an observed \
student; omit it to use the configured default or the authenticated user. Built-in prompts \
(daily-checkin, week-planning, course-analysis, grade-recovery, missing-work-audit) walk \
through common check-in workflows.";

/// The MCP server: a tool registry, the built-in prompts, and the shared
/// execution context.
pub struct CanvasMcpServer {
    tool_registry: Arc<ToolRegistry>,
    prompt_registry: PromptRegistry,
    tool_context: ToolContext,
}

impl CanvasMcpServer {
    /// Build a server from runtime configuration, with every tool
    /// registered.
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(CanvasClient::new(&config)?);
        let tool_context = ToolContext::new(client, config);

        let mut registry = ToolRegistry::new();
        tools::register_all(&mut registry);

        Ok(Self {
            tool_registry: Arc::new(registry),
            prompt_registry: PromptRegistry::new(),
            tool_context,
        })
    }

    fn capabilities() -> ServerCapabilities {
        ServerCapabilities {
            prompts: Some(PromptsCapability {
                list_changed: None,
            }),
            tools: Some(ToolsCapability {
                list_changed: None,
            }),
            resources: None,
            logging: None,
            completions: None,
            experimental: None,
        }
    }

    /// Prompt arguments arrive as JSON; the renderers take strings.
    fn json_map_to_string_map(
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> HashMap<String, String> {
        args.iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

impl ServerHandler for CanvasMcpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            client = %request.client_info.name,
            version = %request.client_info.version,
            "MCP client connecting"
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            server_info: Implementation {
                name: "canvas-lens".into(),
                version: crate::VERSION.into(),
            },
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(&request.name) {
            Some(tool) => {
                tool.execute(request.arguments.unwrap_or_default(), &self.tool_context)
                    .await
            }
            None => Err(McpError::invalid_request(
                format!("Unknown tool: {}", request.name),
                None,
            )),
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: self.prompt_registry.list(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        let arguments = request
            .arguments
            .as_ref()
            .map(Self::json_map_to_string_map)
            .unwrap_or_default();
        self.prompt_registry.render(&request.name, &arguments)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: Self::capabilities(),
            server_info: Implementation {
                name: "canvas-lens".into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> CanvasMcpServer {
        let config = Config::new("https://school.instructure.com", "token");
        CanvasMcpServer::new(config).unwrap()
    }

    #[test]
    fn every_expected_tool_is_registered() {
        let server = server();
        let mut names = server.tool_registry.list_tool_names();
        names.sort();

        for expected in [
            "get_announcements",
            "get_all_students_status",
            "get_calendar_events",
            "get_comprehensive_status",
            "get_courses",
            "get_discussions",
            "get_due_this_week",
            "get_feedback",
            "get_inbox",
            "get_missing_assignments",
            "get_missing_work",
            "get_people",
            "get_recent_grades",
            "get_stats",
            "get_students",
            "get_teacher_communications",
            "get_todo",
            "get_unsubmitted_past_due",
            "get_upcoming_assignments",
            "list_assignments",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
        assert_eq!(names.len(), 20);
    }

    #[test]
    fn server_info_advertises_tools_and_prompts() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn prompt_arguments_can_arrive_as_json_numbers() {
        let mut args = serde_json::Map::new();
        args.insert("student_id".to_string(), serde_json::json!(42));
        let converted = CanvasMcpServer::json_map_to_string_map(&args);
        assert_eq!(converted.get("student_id").map(String::as_str), Some("42"));

        let server = server();
        let rendered = server
            .prompt_registry
            .render("daily-checkin", &converted)
            .unwrap();
        assert_eq!(rendered.messages.len(), 1);
    }

    #[test]
    fn tool_schemas_are_objects() {
        let server = server();
        for tool in server.tool_registry.list_tools() {
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&serde_json::json!("object")),
                "{} schema is not an object",
                tool.name
            );
            assert!(tool.description.is_some());
        }
    }
}
