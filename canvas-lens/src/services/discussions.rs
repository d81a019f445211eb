//! Recently active discussion topics.

use chrono::{DateTime, Duration, Utc};

use crate::api::discussions::{list_discussion_topics, DiscussionOptions};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::DiscussionTopic;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::DiscussionItem;

/// Options for [`recent_discussions`].
#[derive(Debug, Clone)]
pub struct DiscussionsOptions {
    /// Look-back window in days
    pub days: i64,
    /// Restrict to one course
    pub course_id: Option<u64>,
}

impl Default for DiscussionsOptions {
    fn default() -> Self {
        Self {
            days: 14,
            course_id: None,
        }
    }
}

/// List discussion topics with activity inside the look-back window
/// across the student's courses, most recent activity first.
///
/// "Activity" is the later of the post date and the last reply.
pub async fn recent_discussions(
    client: &CanvasClient,
    options: &DiscussionsOptions,
) -> Result<Vec<DiscussionItem>> {
    recent_discussions_at(client, options, Utc::now()).await
}

/// [`recent_discussions`] with an explicit clock.
pub async fn recent_discussions_at(
    client: &CanvasClient,
    options: &DiscussionsOptions,
    now: DateTime<Utc>,
) -> Result<Vec<DiscussionItem>> {
    let courses: Vec<CourseRef> = match options.course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };
    let cutoff = now - Duration::days(options.days);

    let fan_out = fan_out_courses(&courses, |course| async move {
        let topics = list_discussion_topics(
            client,
            &DiscussionOptions {
                course_id: course.id,
                order_by: Some("recent_activity".to_string()),
                per_page: None,
            },
        )
        .await?;

        Ok(topics
            .into_iter()
            .filter(|t| last_activity(t).is_some_and(|at| at >= cutoff))
            .map(|t| DiscussionItem {
                id: t.id,
                title: t.title,
                course_id: course.id,
                course_name: course.name.clone(),
                posted_at: t.posted_at,
                last_reply_at: t.last_reply_at,
                discussion_type: t.discussion_type,
                reply_count: t.discussion_subentry_count,
                unread_count: t.unread_count,
                is_graded: t.assignment_id.is_some(),
                requires_initial_post: t.require_initial_post,
                url: t.html_url,
            })
            .collect())
    })
    .await;

    let mut items = fan_out.into_data("discussions");
    items.sort_by_key(|item| std::cmp::Reverse(activity(item.posted_at, item.last_reply_at)));
    Ok(items)
}

fn last_activity(topic: &DiscussionTopic) -> Option<DateTime<Utc>> {
    activity(topic.posted_at, topic.last_reply_at)
}

/// The later of the post and last-reply timestamps; `None` for a topic
/// that has neither (a delayed topic that never went live).
fn activity(
    posted_at: Option<DateTime<Utc>>,
    last_reply_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    posted_at.max(last_reply_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(posted: Option<&str>, reply: Option<&str>) -> DiscussionTopic {
        DiscussionTopic {
            id: 1,
            title: "Week 4".to_string(),
            posted_at: posted.map(|p| p.parse().unwrap()),
            last_reply_at: reply.map(|r| r.parse().unwrap()),
            discussion_type: None,
            discussion_subentry_count: 0,
            unread_count: 0,
            assignment_id: None,
            require_initial_post: false,
            html_url: String::new(),
        }
    }

    #[test]
    fn activity_is_the_later_of_post_and_reply() {
        let t = topic(Some("2024-03-01T00:00:00Z"), Some("2024-03-10T00:00:00Z"));
        assert_eq!(last_activity(&t), Some("2024-03-10T00:00:00Z".parse().unwrap()));

        // A stale reply timestamp never hides a newer post.
        let t = topic(Some("2024-03-10T00:00:00Z"), Some("2024-03-01T00:00:00Z"));
        assert_eq!(last_activity(&t), Some("2024-03-10T00:00:00Z".parse().unwrap()));

        let t = topic(Some("2024-03-05T00:00:00Z"), None);
        assert_eq!(last_activity(&t), Some("2024-03-05T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn undated_topics_have_no_activity() {
        // A delayed topic that never went live has neither timestamp and
        // must not match any look-back window.
        let t = topic(None, None);
        assert_eq!(last_activity(&t), None);

        let t = topic(None, Some("2024-03-10T00:00:00Z"));
        assert_eq!(last_activity(&t), Some("2024-03-10T00:00:00Z".parse().unwrap()));
    }
}
