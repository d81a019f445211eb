//! Grade, statistics, status, and feedback tools.

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::services::feedback::{recent_feedback, FeedbackOptions};
use crate::services::grades::{recent_grades, GradesOptions};
use crate::services::stats::{course_stats, StatsOptions};
use crate::services::status::{comprehensive_status, multi_student_status, StatusOptions};

use super::{resolve_student, service_response, student_id_property};

/// Register the grade-family tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register(GetRecentGradesTool);
    registry.register(GetStatsTool);
    registry.register(GetComprehensiveStatusTool);
    registry.register(GetAllStudentsStatusTool);
    registry.register(GetFeedbackTool);
}

#[derive(Debug, Default, Deserialize)]
struct RecentGradesRequest {
    student_id: Option<String>,
    days: Option<i64>,
    below_percentage: Option<f64>,
}

/// Recently graded work, optionally only low grades.
pub struct GetRecentGradesTool;

#[async_trait::async_trait]
impl McpTool for GetRecentGradesTool {
    fn name(&self) -> &'static str {
        "get_recent_grades"
    }

    fn description(&self) -> &'static str {
        "List work graded in the last weeks with scores and percentages, optionally only grades below a threshold"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
                "days": {
                    "type": "integer",
                    "description": "Look-back window in days, default 14"
                },
                "below_percentage": {
                    "type": "number",
                    "description": "Only grades strictly below this percentage"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: RecentGradesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        let options = GradesOptions {
            days: request.days.unwrap_or(14),
            below_percentage: request.below_percentage,
        };
        service_response(recent_grades(&context.client, &student, &options).await)
    }
}

#[derive(Debug, Deserialize)]
struct StatsRequest {
    student_id: Option<String>,
    #[serde(default = "default_hide_empty")]
    hide_empty: bool,
}

fn default_hide_empty() -> bool {
    true
}

/// Per-course late/missing statistics.
pub struct GetStatsTool;

#[async_trait::async_trait]
impl McpTool for GetStatsTool {
    fn name(&self) -> &'static str {
        "get_stats"
    }

    fn description(&self) -> &'static str {
        "Late and missing assignment percentages per course, worst courses first"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
                "hide_empty": {
                    "type": "boolean",
                    "description": "Drop courses with no countable submissions, default true"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: StatsRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        let options = StatsOptions {
            hide_empty: request.hide_empty,
        };
        service_response(course_stats(&context.client, &student, &options).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatusRequest {
    student_id: Option<String>,
}

/// The full academic status overview.
pub struct GetComprehensiveStatusTool;

#[async_trait::async_trait]
impl McpTool for GetComprehensiveStatusTool {
    fn name(&self) -> &'static str {
        "get_comprehensive_status"
    }

    fn description(&self) -> &'static str {
        "Full academic status: course grades, missing work, the upcoming week, and recent low grades with summary counts"
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
        let request: StatusRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        service_response(
            comprehensive_status(&context.client, &student, &StatusOptions::default()).await,
        )
    }
}

/// Status for every observed student.
pub struct GetAllStudentsStatusTool;

#[async_trait::async_trait]
impl McpTool for GetAllStudentsStatusTool {
    fn name(&self) -> &'static str {
        "get_all_students_status"
    }

    fn description(&self) -> &'static str {
        "Full academic status for every observed student, labeled by student"
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
        service_response(
            multi_student_status(&context.client, &StatusOptions::default()).await,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct FeedbackRequest {
    student_id: Option<String>,
    days: Option<i64>,
    course_id: Option<u64>,
}

/// Teacher comments on recent submissions.
pub struct GetFeedbackTool;

#[async_trait::async_trait]
impl McpTool for GetFeedbackTool {
    fn name(&self) -> &'static str {
        "get_feedback"
    }

    fn description(&self) -> &'static str {
        "List teacher comments left on the student's submissions in the last weeks"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "student_id": student_id_property(),
                "days": {
                    "type": "integer",
                    "description": "Look-back window in days, default 14"
                },
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
        let request: FeedbackRequest = BaseToolImpl::parse_arguments(arguments)?;
        let student = resolve_student(request.student_id.as_deref(), context)?;
        let options = FeedbackOptions {
            days: request.days.unwrap_or(14),
            course_id: request.course_id,
        };
        service_response(recent_feedback(&context.client, &student, &options).await)
    }
}
