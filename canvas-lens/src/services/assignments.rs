//! Assignment listings across one or all courses.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};

use crate::api::assignments::{list_assignments, AssignmentBucket, AssignmentOptions};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::Assignment;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::AssignmentRow;

/// Options for [`assignment_rows`].
#[derive(Debug, Default, Clone)]
pub struct AssignmentListOptions {
    /// Restrict to one course; all active courses otherwise
    pub course_id: Option<u64>,
    /// Server-side bucket filter
    pub bucket: Option<AssignmentBucket>,
    /// Client-side filter to assignments due in the next seven days
    pub due_this_week: bool,
    /// Name search term
    pub search_term: Option<String>,
}

/// List assignments as flat display rows, soonest due first with undated
/// assignments last.
pub async fn assignment_rows(
    client: &CanvasClient,
    options: &AssignmentListOptions,
) -> Result<Vec<AssignmentRow>> {
    assignment_rows_at(client, options, Utc::now()).await
}

/// [`assignment_rows`] with an explicit clock.
pub async fn assignment_rows_at(
    client: &CanvasClient,
    options: &AssignmentListOptions,
    now: DateTime<Utc>,
) -> Result<Vec<AssignmentRow>> {
    let courses: Vec<CourseRef> = match options.course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };

    let fan_out = fan_out_courses(&courses, |course| {
        let api_options = AssignmentOptions {
            course_id: course.id,
            bucket: options.bucket,
            search_term: options.search_term.clone(),
            include_submission: true,
            order_by_due_at: true,
        };
        async move {
            let assignments = list_assignments(client, &api_options).await?;
            Ok(assignments
                .into_iter()
                .map(|a| assignment_row(course, a))
                .collect())
        }
    })
    .await;

    let mut rows = fan_out.into_data("assignments");
    if options.due_this_week {
        let end = now + Duration::days(7);
        rows.retain(|r| {
            r.due_at
                .map(|due| due >= now && due <= end)
                .unwrap_or(false)
        });
    }
    rows.sort_by(compare_due_asc);
    Ok(rows)
}

fn assignment_row(course: &CourseRef, assignment: Assignment) -> AssignmentRow {
    let submission = assignment.submission.as_deref();
    AssignmentRow {
        id: assignment.id,
        course_id: course.id,
        course_name: course.name.clone(),
        name: assignment.name,
        due_at: assignment.due_at,
        points_possible: assignment.points_possible,
        score: submission.and_then(|s| s.score),
        grade: submission.and_then(|s| s.grade.clone()),
        submitted: submission.map(|s| s.submitted_at.is_some()).unwrap_or(false),
        url: assignment.html_url.unwrap_or_default(),
    }
}

/// Soonest due first; undated rows sort last.
fn compare_due_asc(a: &AssignmentRow, b: &AssignmentRow) -> Ordering {
    match (a.due_at, b.due_at) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, due: Option<&str>) -> AssignmentRow {
        AssignmentRow {
            id: 0,
            course_id: 1,
            course_name: "Biology".to_string(),
            name: name.to_string(),
            due_at: due.map(|d| d.parse().unwrap()),
            points_possible: None,
            score: None,
            grade: None,
            submitted: false,
            url: String::new(),
        }
    }

    #[test]
    fn undated_assignments_sort_after_dated_ones() {
        let mut rows = vec![
            row("undated", None),
            row("late", Some("2024-03-09T00:00:00Z")),
            row("soon", Some("2024-03-02T00:00:00Z")),
        ];
        rows.sort_by(compare_due_asc);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["soon", "late", "undated"]);
    }

    #[test]
    fn due_this_week_excludes_past_and_far_future() {
        let now: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let end = now + Duration::days(7);
        let mut rows = vec![
            row("past", Some("2024-02-28T00:00:00Z")),
            row("in window", Some("2024-03-05T00:00:00Z")),
            row("far", Some("2024-04-01T00:00:00Z")),
            row("undated", None),
        ];
        rows.retain(|r| {
            r.due_at
                .map(|due| due >= now && due <= end)
                .unwrap_or(false)
        });
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "in window");
    }
}
