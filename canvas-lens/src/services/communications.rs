//! Announcements, inbox conversations, and the joined teacher
//! communications view.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::api::announcements::{list_announcements, AnnouncementOptions};
use crate::api::conversations::{list_conversations, ConversationOptions};
use crate::client::CanvasClient;
use crate::error::Result;

use super::fan_out::CourseRef;
use super::students::active_course_refs;
use super::types::{AnnouncementItem, InboxItem, TeacherCommunications};
use super::upcoming::course_id_from_context;

/// Options for [`recent_announcements`].
#[derive(Debug, Clone)]
pub struct AnnouncementsOptions {
    /// Look-back window in days
    pub days: i64,
    /// Restrict to one course
    pub course_id: Option<u64>,
}

impl Default for AnnouncementsOptions {
    fn default() -> Self {
        Self {
            days: 14,
            course_id: None,
        }
    }
}

/// List announcements posted within the look-back window across the
/// student's courses, newest first.
pub async fn recent_announcements(
    client: &CanvasClient,
    options: &AnnouncementsOptions,
) -> Result<Vec<AnnouncementItem>> {
    let courses = match options.course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now();
    let announcements = list_announcements(
        client,
        &AnnouncementOptions {
            context_codes: courses.iter().map(|c| format!("course_{}", c.id)).collect(),
            start_date: Some(now - Duration::days(options.days)),
            end_date: Some(now),
        },
    )
    .await?;

    let names: HashMap<u64, &str> = courses.iter().map(|c| (c.id, c.name.as_str())).collect();
    let mut items: Vec<AnnouncementItem> = announcements
        .into_iter()
        // Delayed announcements have no posted_at until they go live.
        .filter_map(|a| {
            let posted_at = a.posted_at?;
            let course_id = course_id_from_context(&a.context_code).unwrap_or(0);
            Some(AnnouncementItem {
                id: a.id,
                title: a.title,
                message: a.message,
                posted_at,
                course_id,
                course_name: names
                    .get(&course_id)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                author_name: a.author.display_name,
                url: a.html_url,
            })
        })
        .collect();

    items.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    Ok(items)
}

/// Options for [`inbox`].
#[derive(Debug, Default, Clone)]
pub struct InboxOptions {
    /// `inbox`, `unread`, `archived`, `starred`, or `sent`
    pub scope: Option<String>,
    /// Restrict to conversations in one course
    pub course_id: Option<u64>,
}

/// List the caller's inbox conversations, most recent message first.
///
/// The inbox is account-scoped: observer accounts see their own
/// conversations with teachers, never the student's.
pub async fn inbox(client: &CanvasClient, options: &InboxOptions) -> Result<Vec<InboxItem>> {
    let conversations = list_conversations(
        client,
        &ConversationOptions {
            scope: options.scope.clone(),
            filter: options
                .course_id
                .map(|id| vec![format!("course_{id}")])
                .unwrap_or_default(),
        },
    )
    .await?;

    let mut items: Vec<InboxItem> = conversations
        .into_iter()
        .map(|c| InboxItem {
            id: c.id,
            subject: c.subject,
            last_message: c.last_message,
            last_message_at: c.last_message_at,
            message_count: c.message_count,
            workflow_state: c.workflow_state,
            participants: c.participants.into_iter().map(|p| p.name).collect(),
            context_name: c.context_name,
        })
        .collect();

    items.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
    Ok(items)
}

/// Announcements and inbox joined into one view, fetched in parallel.
pub async fn teacher_communications(
    client: &CanvasClient,
    announcement_options: &AnnouncementsOptions,
    inbox_options: &InboxOptions,
) -> Result<TeacherCommunications> {
    let (announcements, inbox) = futures::future::try_join(
        recent_announcements(client, announcement_options),
        inbox(client, inbox_options),
    )
    .await?;

    Ok(TeacherCommunications {
        announcements,
        inbox,
    })
}
