//! Canvas Discussion Topics API.

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::DiscussionTopic;

/// Options for [`list_discussion_topics`].
#[derive(Debug, Default, Clone)]
pub struct DiscussionOptions {
    /// Course to list topics in
    pub course_id: u64,
    /// `position`, `recent_activity`, or `title`
    pub order_by: Option<String>,
    /// Page size hint
    pub per_page: Option<u32>,
}

/// List discussion topics for a course.
pub async fn list_discussion_topics(
    client: &CanvasClient,
    options: &DiscussionOptions,
) -> Result<Vec<DiscussionTopic>> {
    let mut query = Query::new();
    if let Some(order_by) = &options.order_by {
        query = query.scalar("order_by", order_by);
    }
    if let Some(per_page) = options.per_page {
        query = query.scalar("per_page", per_page);
    }

    client
        .get_all(
            &format!("/courses/{}/discussion_topics", options.course_id),
            &query,
        )
        .await
}
