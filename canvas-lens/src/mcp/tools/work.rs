//! Missing, unsubmitted, due, upcoming, and to-do tools.

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;

use crate::api::assignments::AssignmentBucket;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::services::assignments::{assignment_rows, AssignmentListOptions};
use crate::services::due::{due_assignments, DueOptions};
use crate::services::missing::{missing_assignments, missing_work, MissingOptions};
use crate::services::todo::{todo_items, TodoOptions};
use crate::services::unsubmitted::{unsubmitted_assignments, UnsubmittedOptions};
use crate::services::upcoming::upcoming_assignments;

use super::{resolve_student, service_response, student_id_property};

/// Register the work-family tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register(GetMissingAssignmentsTool);
    registry.register(GetUnsubmittedPastDueTool);
    registry.register(GetMissingWorkTool);
    registry.register(GetDueThisWeekTool);
    registry.register(GetUpcomingAssignmentsTool);
    registry.register(ListAssignmentsTool);
    registry.register(GetTodoTool);
}

#[derive(Debug, Default, Deserialize)]
struct MissingRequest {
    student_id: Option<String>,
    course_id: Option<u64>,
    #[serde(default)]
    all_grading_periods: bool,
}

impl MissingRequest {
    fn options(&self) -> MissingOptions {
        MissingOptions {
            course_id: self.course_id,
            all_grading_periods: self.all_grading_periods,
        }
    }
}

fn missing_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "student_id": student_id_property(),
            "course_id": {
                "type": "integer",
                "description": "Restrict to one course"
            },
            "all_grading_periods": {
                "type": "boolean",
                "description": "Include all grading periods instead of only the current one"
            }
        }
    })
}

/// Assignments the server has flagged missing.
pub struct GetMissingAssignmentsTool;

#[async_trait::async_trait]
impl McpTool for GetMissingAssignmentsTool {
    fn name(&self) -> &'static str {
        "get_missing_assignments"
    }

    fn description(&self) -> &'static str {
        "List assignments Canvas has flagged as missing for the student, current grading period by default"
    }

    fn schema(&self) -> serde_json::Value {
        missing_schema()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: MissingRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        service_response(
            missing_assignments(&context.client, &student, &request.options()).await,
        )
    }
}

/// Past-due assignments with no submission, derived client-side.
pub struct GetUnsubmittedPastDueTool;

#[async_trait::async_trait]
impl McpTool for GetUnsubmittedPastDueTool {
    fn name(&self) -> &'static str {
        "get_unsubmitted_past_due"
    }

    fn description(&self) -> &'static str {
        "List past-due assignments with nothing submitted, found by scanning submissions (catches work the server does not flag missing)"
    }

    fn schema(&self) -> serde_json::Value {
        missing_schema()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: MissingRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        service_response(
            unsubmitted_assignments(
                &context.client,
                &student,
                &UnsubmittedOptions {
                    course_id: request.course_id,
                    all_grading_periods: request.all_grading_periods,
                },
            )
            .await,
        )
    }
}

/// The reconciled missing + unsubmitted view.
pub struct GetMissingWorkTool;

#[async_trait::async_trait]
impl McpTool for GetMissingWorkTool {
    fn name(&self) -> &'static str {
        "get_missing_work"
    }

    fn description(&self) -> &'static str {
        "List all missing work, combining the server's missing flag with unsubmitted past-due assignments, deduplicated"
    }

    fn schema(&self) -> serde_json::Value {
        missing_schema()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: MissingRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        service_response(
            missing_work(&context.client, &student, &request.options(), true).await,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct DueRequest {
    student_id: Option<String>,
    days: Option<i64>,
    #[serde(default)]
    hide_graded: bool,
}

/// Assignments due within the upcoming window.
pub struct GetDueThisWeekTool;

#[async_trait::async_trait]
impl McpTool for GetDueThisWeekTool {
    fn name(&self) -> &'static str {
        "get_due_this_week"
    }

    fn description(&self) -> &'static str {
        "List assignments due in the next week (or a custom number of days) across all courses"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
                "days": {
                    "type": "integer",
                    "description": "Window length in days, default 7"
                },
                "hide_graded": {
                    "type": "boolean",
                    "description": "Drop assignments that already have a score"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DueRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        let options = DueOptions {
            days: request.days.unwrap_or(7),
            hide_graded: request.hide_graded,
        };
        service_response(due_assignments(&context.client, &student, &options).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct UpcomingRequest {
    course_id: Option<u64>,
}

/// Upcoming-bucket assignments per course.
pub struct GetUpcomingAssignmentsTool;

#[async_trait::async_trait]
impl McpTool for GetUpcomingAssignmentsTool {
    fn name(&self) -> &'static str {
        "get_upcoming_assignments"
    }

    fn description(&self) -> &'static str {
        "List each course's upcoming assignments from the server's upcoming bucket"
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
        let request: UpcomingRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(upcoming_assignments(&context.client, request.course_id).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListAssignmentsRequest {
    course_id: Option<u64>,
    bucket: Option<String>,
    #[serde(default)]
    due_this_week: bool,
    search_term: Option<String>,
}

/// Flat assignment listing with bucket / window / search modes.
pub struct ListAssignmentsTool;

#[async_trait::async_trait]
impl McpTool for ListAssignmentsTool {
    fn name(&self) -> &'static str {
        "list_assignments"
    }

    fn description(&self) -> &'static str {
        "List assignments in one or all courses, optionally filtered by bucket, due-this-week window, or a name search"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "course_id": {
                    "type": "integer",
                    "description": "Restrict to one course"
                },
                "bucket": {
                    "type": "string",
                    "enum": ["past", "overdue", "undated", "ungraded", "unsubmitted", "upcoming", "future"],
                    "description": "Server-side assignment bucket"
                },
                "due_this_week": {
                    "type": "boolean",
                    "description": "Keep only assignments due in the next seven days"
                },
                "search_term": {
                    "type": "string",
                    "description": "Filter assignments by name"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListAssignmentsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let bucket = match request.bucket.as_deref() {
            Some(name) => Some(AssignmentBucket::parse(name).ok_or_else(|| {
                McpError::invalid_request(format!("unknown bucket: {name}"), None)
            })?),
            None => None,
        };
        let options = AssignmentListOptions {
            course_id: request.course_id,
            bucket,
            due_this_week: request.due_this_week,
            search_term: request.search_term,
        };
        service_response(assignment_rows(&context.client, &options).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct TodoRequest {
    student_id: Option<String>,
    days: Option<i64>,
    #[serde(default)]
    hide_submitted: bool,
}

/// Planner-backed to-do list.
pub struct GetTodoTool;

#[async_trait::async_trait]
impl McpTool for GetTodoTool {
    fn name(&self) -> &'static str {
        "get_todo"
    }

    fn description(&self) -> &'static str {
        "List the student's planner items (assignments, quizzes, discussions) for the coming days"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
                "days": {
                    "type": "integer",
                    "description": "Window length in days, default 7"
                },
                "hide_submitted": {
                    "type": "boolean",
                    "description": "Drop items the student has already submitted"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: TodoRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        let options = TodoOptions {
            days: request.days.unwrap_or(7),
            hide_submitted: request.hide_submitted,
        };
        service_response(todo_items(&context.client, &student, &options).await)
    }
}
