//! Assignments due within an upcoming window.

use chrono::{DateTime, Duration, Utc};

use crate::api::submissions::{list_submissions, SubmissionOptions};
use crate::api::users::{resolve_user_id, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::Submission;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::DueAssignment;

/// Options for [`due_assignments`].
#[derive(Debug, Clone)]
pub struct DueOptions {
    /// Window length in days, starting at now
    pub days: i64,
    /// Drop assignments that already carry a score
    pub hide_graded: bool,
}

impl Default for DueOptions {
    fn default() -> Self {
        Self {
            days: 7,
            hide_graded: false,
        }
    }
}

/// List assignments due between now and now + `days`, across all active
/// courses, sorted soonest first.
pub async fn due_assignments(
    client: &CanvasClient,
    student: &UserRef,
    options: &DueOptions,
) -> Result<Vec<DueAssignment>> {
    due_assignments_at(client, student, options, Utc::now()).await
}

/// [`due_assignments`] with an explicit clock.
pub async fn due_assignments_at(
    client: &CanvasClient,
    student: &UserRef,
    options: &DueOptions,
    now: DateTime<Utc>,
) -> Result<Vec<DueAssignment>> {
    let student_id = resolve_user_id(client, student).await?;
    let courses = active_course_refs(client).await?;
    let window_end = now + Duration::days(options.days);

    let fan_out = fan_out_courses(&courses, |course| async move {
        let submissions = list_submissions(
            client,
            &SubmissionOptions::for_student(course.id, student_id),
        )
        .await?;
        Ok(course_due_rows(course, submissions, now, window_end))
    })
    .await;

    let mut items = fan_out.into_data("due");
    if options.hide_graded {
        items.retain(|item| item.score.is_none());
    }
    items.sort_by(|a, b| a.due_at.cmp(&b.due_at));
    Ok(items)
}

/// Keep the submissions whose assignment is due inside `[now, end]`,
/// both bounds inclusive. Undated assignments never match.
fn course_due_rows(
    course: &CourseRef,
    submissions: Vec<Submission>,
    now: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DueAssignment> {
    submissions
        .into_iter()
        .filter_map(|sub| {
            let assignment = sub.assignment?;
            let due_at = assignment.due_at?;
            if due_at < now || due_at > end {
                return None;
            }
            Some(DueAssignment {
                course_id: course.id,
                course_name: course.name.clone(),
                assignment_id: assignment.id,
                assignment_name: assignment.name,
                due_at,
                points_possible: assignment.points_possible,
                submitted: sub.submitted_at.is_some(),
                score: sub.score,
                grade: sub.grade,
                url: assignment.html_url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::RoutedTransport;
    use crate::types::Assignment;

    fn course() -> CourseRef {
        CourseRef {
            id: 10,
            name: "Biology".to_string(),
        }
    }

    fn submission(name: &str, due: Option<&str>, score: Option<f64>) -> Submission {
        Submission {
            assignment_id: 1,
            assignment: Some(Assignment {
                id: 1,
                name: name.to_string(),
                course_id: 10,
                due_at: due.map(|d| d.parse().unwrap()),
                points_possible: Some(10.0),
                html_url: None,
                submission: None,
            }),
            submitted_at: None,
            graded_at: None,
            score,
            grade: None,
            late: false,
            missing: false,
            grading_period_id: None,
            workflow_state: None,
            submission_comments: None,
            html_url: None,
        }
    }

    #[test]
    fn keeps_only_assignments_inside_the_window() {
        let now: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let end = now + Duration::days(7);
        let rows = course_due_rows(
            &course(),
            vec![
                submission("past", Some("2024-02-28T00:00:00Z"), None),
                submission("inside", Some("2024-03-04T00:00:00Z"), None),
                submission("boundary", Some("2024-03-08T00:00:00Z"), None),
                submission("beyond", Some("2024-03-09T00:00:00Z"), None),
                submission("undated", None, None),
            ],
            now,
            end,
        );
        let names: Vec<&str> = rows.iter().map(|r| r.assignment_name.as_str()).collect();
        assert_eq!(names, vec!["inside", "boundary"]);
    }

    #[tokio::test]
    async fn window_is_applied_to_canned_pages_end_to_end() {
        let client = RoutedTransport::new()
            .route("/courses", r#"[{"id": 10, "name": "Biology"}]"#)
            .route(
                "/courses/10/students/submissions",
                r#"[{"assignment_id": 1, "assignment": {"id": 1, "name": "past",
                     "course_id": 10, "due_at": "2024-02-28T00:00:00Z"}},
                    {"assignment_id": 2, "assignment": {"id": 2, "name": "boundary",
                     "course_id": 10, "due_at": "2024-03-08T00:00:00Z"}},
                    {"assignment_id": 3, "assignment": {"id": 3, "name": "inside",
                     "course_id": 10, "due_at": "2024-03-04T00:00:00Z"}},
                    {"assignment_id": 4, "assignment": {"id": 4, "name": "beyond",
                     "course_id": 10, "due_at": "2024-03-09T00:00:00Z"}}]"#,
            )
            .client();

        let now: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let items = due_assignments_at(&client, &UserRef::Id(99), &DueOptions::default(), now)
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.assignment_name.as_str()).collect();
        assert_eq!(names, vec!["inside", "boundary"]);
    }

    #[test]
    fn graded_rows_survive_the_window_but_can_be_hidden() {
        let now: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let end = now + Duration::days(7);
        let mut rows = course_due_rows(
            &course(),
            vec![
                submission("graded", Some("2024-03-02T00:00:00Z"), Some(9.0)),
                submission("ungraded", Some("2024-03-03T00:00:00Z"), None),
            ],
            now,
            end,
        );
        assert_eq!(rows.len(), 2);

        rows.retain(|r| r.score.is_none());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assignment_name, "ungraded");
    }
}
