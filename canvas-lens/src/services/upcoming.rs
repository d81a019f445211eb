//! Upcoming work: per-course assignment buckets and the user-level
//! upcoming feed.

use crate::api::assignments::{list_assignments, AssignmentBucket, AssignmentOptions};
use crate::api::users::{get_upcoming_events, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::{CourseUpcoming, UpcomingAssignment, UpcomingEventItem};

/// List each active course's upcoming-bucket assignments. Courses with
/// nothing upcoming are kept with an empty list so the caller can render
/// "all caught up" per course.
pub async fn upcoming_assignments(
    client: &CanvasClient,
    course_id: Option<u64>,
) -> Result<Vec<CourseUpcoming>> {
    let courses: Vec<CourseRef> = match course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };

    let fan_out = fan_out_courses(&courses, |course| async move {
        let assignments = list_assignments(
            client,
            &AssignmentOptions {
                course_id: course.id,
                bucket: Some(AssignmentBucket::Upcoming),
                include_submission: true,
                order_by_due_at: true,
                ..AssignmentOptions::default()
            },
        )
        .await?;

        Ok(vec![CourseUpcoming {
            course_id: course.id,
            course_name: course.name.clone(),
            assignments: assignments
                .into_iter()
                .map(|a| UpcomingAssignment {
                    id: a.id,
                    name: a.name,
                    due_at: a.due_at,
                    points_possible: a.points_possible,
                    submitted: a
                        .submission
                        .as_ref()
                        .map(|s| s.submitted_at.is_some())
                        .unwrap_or(false),
                    url: a.html_url.unwrap_or_default(),
                })
                .collect(),
        }])
    })
    .await;

    Ok(fan_out.into_data("upcoming"))
}

/// The user-level upcoming feed, optionally restricted to `assignment`
/// or `event` entries.
pub async fn upcoming_events(
    client: &CanvasClient,
    student: &UserRef,
    kind: Option<&str>,
) -> Result<Vec<UpcomingEventItem>> {
    let events = get_upcoming_events(client, student).await?;

    Ok(events
        .into_iter()
        .filter(|e| kind.map(|k| e.kind == k).unwrap_or(true))
        .map(|e| UpcomingEventItem {
            kind: e.kind,
            title: e.title,
            start_at: e.start_at,
            course_id: e.context_code.as_deref().and_then(course_id_from_context),
            url: e.html_url.unwrap_or_default(),
        })
        .collect())
}

/// Extract the numeric id from a `course_123` context code.
pub(crate) fn course_id_from_context(context_code: &str) -> Option<u64> {
    context_code.strip_prefix("course_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_codes_parse_only_course_contexts() {
        assert_eq!(course_id_from_context("course_123"), Some(123));
        assert_eq!(course_id_from_context("user_5"), None);
        assert_eq!(course_id_from_context("course_"), None);
        assert_eq!(course_id_from_context("course_abc"), None);
    }
}
