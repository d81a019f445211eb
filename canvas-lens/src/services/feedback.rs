//! Teacher feedback: submission comments extracted across courses.

use chrono::{DateTime, Duration, Utc};

use crate::api::submissions::{list_submissions, SubmissionOptions};
use crate::api::users::{resolve_user_id, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::Submission;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::FeedbackItem;

/// Options for [`recent_feedback`].
#[derive(Debug, Clone)]
pub struct FeedbackOptions {
    /// Look-back window in days
    pub days: i64,
    /// Restrict to one course
    pub course_id: Option<u64>,
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        Self {
            days: 14,
            course_id: None,
        }
    }
}

/// List submission comments written within the look-back window, one row
/// per comment, newest first.
pub async fn recent_feedback(
    client: &CanvasClient,
    student: &UserRef,
    options: &FeedbackOptions,
) -> Result<Vec<FeedbackItem>> {
    recent_feedback_at(client, student, options, Utc::now()).await
}

/// [`recent_feedback`] with an explicit clock.
pub async fn recent_feedback_at(
    client: &CanvasClient,
    student: &UserRef,
    options: &FeedbackOptions,
    now: DateTime<Utc>,
) -> Result<Vec<FeedbackItem>> {
    let student_id = resolve_user_id(client, student).await?;
    let courses: Vec<CourseRef> = match options.course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };
    let cutoff = now - Duration::days(options.days);

    let fan_out = fan_out_courses(&courses, |course| async move {
        let submissions = list_submissions(
            client,
            &SubmissionOptions::for_student(course.id, student_id).with_comments(),
        )
        .await?;
        Ok(comment_rows(course, submissions, cutoff))
    })
    .await;

    let mut items = fan_out.into_data("feedback");
    items.sort_by(|a, b| b.comment_date.cmp(&a.comment_date));
    Ok(items)
}

/// One row per in-window comment. A submission with three recent
/// comments yields three rows sharing the assignment context.
fn comment_rows(
    course: &CourseRef,
    submissions: Vec<Submission>,
    cutoff: DateTime<Utc>,
) -> Vec<FeedbackItem> {
    let mut rows = Vec::new();
    for sub in submissions {
        let Some(assignment) = sub.assignment else {
            continue;
        };
        let Some(comments) = sub.submission_comments else {
            continue;
        };
        for comment in comments {
            if comment.created_at < cutoff {
                continue;
            }
            rows.push(FeedbackItem {
                assignment_id: assignment.id,
                assignment_name: assignment.name.clone(),
                course_id: course.id,
                course_name: course.name.clone(),
                comment_text: comment.comment,
                author_name: comment.author_name,
                comment_date: comment.created_at,
                student_score: sub.score,
                points_possible: assignment.points_possible,
                grade: sub.grade.clone(),
                url: assignment.html_url.clone().unwrap_or_default(),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Assignment, SubmissionComment};

    fn submission_with_comments(comments: Vec<(&str, &str)>) -> Submission {
        Submission {
            assignment_id: 1,
            assignment: Some(Assignment {
                id: 1,
                name: "Essay".to_string(),
                course_id: 10,
                due_at: None,
                points_possible: Some(20.0),
                html_url: None,
                submission: None,
            }),
            submitted_at: None,
            graded_at: None,
            score: Some(17.0),
            grade: Some("B+".to_string()),
            late: false,
            missing: false,
            grading_period_id: None,
            workflow_state: None,
            submission_comments: Some(
                comments
                    .into_iter()
                    .map(|(text, at)| SubmissionComment {
                        comment: text.to_string(),
                        author_name: "Ms. Frizzle".to_string(),
                        created_at: at.parse().unwrap(),
                    })
                    .collect(),
            ),
            html_url: None,
        }
    }

    #[test]
    fn each_in_window_comment_becomes_its_own_row() {
        let course = CourseRef {
            id: 10,
            name: "English".to_string(),
        };
        let cutoff: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let rows = comment_rows(
            &course,
            vec![submission_with_comments(vec![
                ("great thesis", "2024-03-05T00:00:00Z"),
                ("fix citations", "2024-03-06T00:00:00Z"),
                ("old note", "2024-02-01T00:00:00Z"),
            ])],
            cutoff,
        );

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.assignment_name == "Essay"));
        assert!(rows.iter().all(|r| r.student_score == Some(17.0)));
    }
}
