//! MCP tool implementations, grouped by feature family.

pub mod communications;
pub mod courses;
pub mod grades;
pub mod work;

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Serialize;

use crate::api::users::{effective_student, UserRef};

use super::tool_registry::{BaseToolImpl, ToolContext, ToolRegistry};

/// Register every tool family.
pub fn register_all(registry: &mut ToolRegistry) {
    courses::register(registry);
    work::register(registry);
    grades::register(registry);
    communications::register(registry);
}

/// Resolve the student a tool call targets: explicit argument, then the
/// configured default, then the authenticated user.
pub(crate) fn resolve_student(
    explicit: Option<&str>,
    context: &ToolContext,
) -> std::result::Result<UserRef, McpError> {
    effective_student(explicit, context.config.default_student_id.as_deref())
        .map_err(|e| McpError::invalid_request(e.to_string(), None))
}

/// Turn a service result into a tool response: data as pretty JSON,
/// errors as error-flagged text the assistant can relay.
pub(crate) fn service_response<T: Serialize>(
    result: crate::error::Result<T>,
) -> std::result::Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| McpError::internal_error(e.to_string(), None))?;
            Ok(BaseToolImpl::create_success_response(json))
        }
        Err(err) => Ok(BaseToolImpl::create_error_response(
            "Canvas request failed",
            Some(err.to_string()),
        )),
    }
}

/// The `student_id` property every student-scoped tool accepts.
pub(crate) fn student_id_property() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "Canvas user id of the student to query; omit for the configured default or the authenticated user"
    })
}
