//! Announcement, inbox, calendar, and discussion tools.

use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde::Deserialize;

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use crate::services::calendar::{calendar_events, CalendarEventsOptions};
use crate::services::communications::{
    inbox, recent_announcements, teacher_communications, AnnouncementsOptions, InboxOptions,
};
use crate::services::discussions::{recent_discussions, DiscussionsOptions};

use super::service_response;

/// Register the communication-family tools.
pub fn register(registry: &mut ToolRegistry) {
    registry.register(GetAnnouncementsTool);
    registry.register(GetInboxTool);
    registry.register(GetTeacherCommunicationsTool);
    registry.register(GetCalendarEventsTool);
    registry.register(GetDiscussionsTool);
}

#[derive(Debug, Default, Deserialize)]
struct AnnouncementsRequest {
    days: Option<i64>,
    course_id: Option<u64>,
}

impl AnnouncementsRequest {
    fn options(&self) -> AnnouncementsOptions {
        AnnouncementsOptions {
            days: self.days.unwrap_or(14),
            course_id: self.course_id,
        }
    }
}

fn announcements_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
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

/// Recent course announcements.
pub struct GetAnnouncementsTool;

#[async_trait::async_trait]
impl McpTool for GetAnnouncementsTool {
    fn name(&self) -> &'static str {
        "get_announcements"
    }

    fn description(&self) -> &'static str {
        "List announcements posted in the student's courses over the last weeks, newest first"
    }

    fn schema(&self) -> serde_json::Value {
        announcements_schema()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AnnouncementsRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(recent_announcements(&context.client, &request.options()).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct InboxRequest {
    scope: Option<String>,
    course_id: Option<u64>,
}

impl InboxRequest {
    fn options(&self) -> InboxOptions {
        InboxOptions {
            scope: self.scope.clone(),
            course_id: self.course_id,
        }
    }
}

/// The caller's Canvas inbox.
pub struct GetInboxTool;

#[async_trait::async_trait]
impl McpTool for GetInboxTool {
    fn name(&self) -> &'static str {
        "get_inbox"
    }

    fn description(&self) -> &'static str {
        "List the authenticated account's Canvas inbox conversations, most recent first"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "scope": {
                    "type": "string",
                    "enum": ["inbox", "unread", "archived", "starred", "sent"],
                    "description": "Conversation scope, default inbox"
                },
                "course_id": {
                    "type": "integer",
                    "description": "Restrict to conversations in one course"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: InboxRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(inbox(&context.client, &request.options()).await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct CommunicationsRequest {
    days: Option<i64>,
    course_id: Option<u64>,
    scope: Option<String>,
}

/// Announcements and inbox joined.
pub struct GetTeacherCommunicationsTool;

#[async_trait::async_trait]
impl McpTool for GetTeacherCommunicationsTool {
    fn name(&self) -> &'static str {
        "get_teacher_communications"
    }

    fn description(&self) -> &'static str {
        "Announcements and inbox conversations in one view, for catching up on everything teachers have sent"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "description": "Announcement look-back window in days, default 14"
                },
                "course_id": {
                    "type": "integer",
                    "description": "Restrict both views to one course"
                },
                "scope": {
                    "type": "string",
                    "enum": ["inbox", "unread", "archived", "starred", "sent"],
                    "description": "Conversation scope, default inbox"
                }
            }
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: CommunicationsRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(
            teacher_communications(
                &context.client,
                &AnnouncementsOptions {
                    days: request.days.unwrap_or(14),
                    course_id: request.course_id,
                },
                &InboxOptions {
                    scope: request.scope,
                    course_id: request.course_id,
                },
            )
            .await,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct CalendarRequest {
    days: Option<i64>,
    course_id: Option<u64>,
}

/// Non-assignment calendar events.
pub struct GetCalendarEventsTool;

#[async_trait::async_trait]
impl McpTool for GetCalendarEventsTool {
    fn name(&self) -> &'static str {
        "get_calendar_events"
    }

    fn description(&self) -> &'static str {
        "List upcoming course calendar events (field trips, tests, meetings) excluding assignment deadlines"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "description": "Look-ahead window in days, default 14"
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
        let request: CalendarRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(
            calendar_events(
                &context.client,
                &CalendarEventsOptions {
                    days: request.days.unwrap_or(14),
                    course_id: request.course_id,
                },
            )
            .await,
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct DiscussionsRequest {
    days: Option<i64>,
    course_id: Option<u64>,
}

/// Recently active discussion topics.
pub struct GetDiscussionsTool;

#[async_trait::async_trait]
impl McpTool for GetDiscussionsTool {
    fn name(&self) -> &'static str {
        "get_discussions"
    }

    fn description(&self) -> &'static str {
        "List discussion topics with recent activity across the student's courses"
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
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
        let request: DiscussionsRequest = BaseToolImpl::parse_arguments(arguments)?;
        service_response(
            recent_discussions(
                &context.client,
                &DiscussionsOptions {
                    days: request.days.unwrap_or(14),
                    course_id: request.course_id,
                },
            )
            .await,
        )
    }
}
