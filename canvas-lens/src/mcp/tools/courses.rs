//! Course, roster, and observee tools.

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::services::{courses, people, students};

use super::{resolve_student, service_response, student_id_property};

/// Register the course-family tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register(GetCoursesTool);
    registry.register(GetPeopleTool);
    registry.register(GetStudentsTool);
}

#[derive(Debug, Default, Deserialize)]
struct GetCoursesRequest {
    student_id: Option<String>,
}

/// Active courses with current-grading-period grades.
pub struct GetCoursesTool;

#[async_trait::async_trait]
impl McpTool for GetCoursesTool {
    fn name(&self) -> &'static str {
        "get_courses"
    }

    fn description(&self) -> &'static str {
        "List the student's active courses with current grades, scoped to the current grading period"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetCoursesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        service_response(courses::course_grades(&context.client, &student).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GetPeopleRequest {
    course_id: Option<u64>,
}

/// Teachers and TAs across courses, deduplicated.
pub struct GetPeopleTool;

#[async_trait::async_trait]
impl McpTool for GetPeopleTool {
    fn name(&self) -> &'static str {
        "get_people"
    }

    fn description(&self) -> &'static str {
        "List teachers and TAs across the student's courses, one entry per person with all their courses"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "course_id": {
                    "type": "integer",
                    "description": "Restrict to one course"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetPeopleRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(people::course_people(&context.client, request.course_id).await)
    }
}

/// Observed students of the authenticated (parent) account.
pub struct GetStudentsTool;

#[async_trait::async_trait]
impl McpTool for GetStudentsTool {
    fn name(&self) -> &'static str {
        "get_students"
    }

    fn description(&self) -> &'static str {
        "List the students observed by the authenticated account, with their Canvas user ids"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        service_response(students::observed_students(&context.client).await)
    }
}
