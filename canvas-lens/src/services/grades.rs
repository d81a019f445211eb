//! Recently graded work, with an optional low-grade filter.

use chrono::{DateTime, Duration, Utc};

use crate::api::submissions::list_graded_submissions;
use crate::api::users::{resolve_user_id, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::Submission;

use super::fan_out::{fan_out_courses, CourseRef};
use super::students::active_course_refs;
use super::types::GradedAssignment;

/// Options for [`recent_grades`].
#[derive(Debug, Clone)]
pub struct GradesOptions {
    /// Look-back window in days
    pub days: i64,
    /// Only grades strictly below this percentage
    pub below_percentage: Option<f64>,
}

impl Default for GradesOptions {
    fn default() -> Self {
        Self {
            days: 14,
            below_percentage: None,
        }
    }
}

/// List work graded within the look-back window, most recent first.
pub async fn recent_grades(
    client: &CanvasClient,
    student: &UserRef,
    options: &GradesOptions,
) -> Result<Vec<GradedAssignment>> {
    recent_grades_at(client, student, options, Utc::now()).await
}

/// [`recent_grades`] with an explicit clock.
pub async fn recent_grades_at(
    client: &CanvasClient,
    student: &UserRef,
    options: &GradesOptions,
    now: DateTime<Utc>,
) -> Result<Vec<GradedAssignment>> {
    let student_id = resolve_user_id(client, student).await?;
    let courses = active_course_refs(client).await?;
    let cutoff = now - Duration::days(options.days);

    let fan_out = fan_out_courses(&courses, |course| async move {
        let submissions = list_graded_submissions(client, course.id, student_id).await?;
        Ok(course_graded_rows(course, submissions, cutoff))
    })
    .await;

    let mut items = fan_out.into_data("grades");
    if let Some(threshold) = options.below_percentage {
        items.retain(|item| {
            item.percentage
                .map(|pct| (pct as f64) < threshold)
                .unwrap_or(false)
        });
    }
    items.sort_by(|a, b| b.graded_at.cmp(&a.graded_at));
    Ok(items)
}

fn course_graded_rows(
    course: &CourseRef,
    submissions: Vec<Submission>,
    cutoff: DateTime<Utc>,
) -> Vec<GradedAssignment> {
    submissions
        .into_iter()
        .filter(|sub| sub.graded_at.map(|at| at >= cutoff).unwrap_or(false))
        .filter_map(|sub| {
            let assignment = sub.assignment?;
            // Ungradable (zero-point) assignments carry no percentage.
            let points_possible = assignment.points_possible.unwrap_or(0.0);
            Some(GradedAssignment {
                course_id: course.id,
                course_name: course.name.clone(),
                assignment_id: assignment.id,
                assignment_name: assignment.name,
                graded_at: sub.graded_at,
                score: sub.score,
                points_possible,
                percentage: percentage(sub.score, points_possible),
                grade: sub.grade,
                late: sub.late,
                url: assignment.html_url,
            })
        })
        .collect()
}

/// Whole-number percentage, `None` when the score or a positive points
/// total is missing.
pub(crate) fn percentage(score: Option<f64>, points_possible: f64) -> Option<i64> {
    let score = score?;
    if points_possible <= 0.0 {
        return None;
    }
    Some((score / points_possible * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Assignment;

    fn graded(name: &str, graded_at: &str, score: f64, points: f64) -> Submission {
        Submission {
            assignment_id: 1,
            assignment: Some(Assignment {
                id: 1,
                name: name.to_string(),
                course_id: 10,
                due_at: None,
                points_possible: Some(points),
                html_url: None,
                submission: None,
            }),
            submitted_at: None,
            graded_at: Some(graded_at.parse().unwrap()),
            score: Some(score),
            grade: None,
            late: false,
            missing: false,
            grading_period_id: None,
            workflow_state: Some("graded".to_string()),
            submission_comments: None,
            html_url: None,
        }
    }

    #[test]
    fn percentage_rounds_and_handles_zero_points() {
        assert_eq!(percentage(Some(17.0), 20.0), Some(85));
        assert_eq!(percentage(Some(2.0), 3.0), Some(67));
        assert_eq!(percentage(Some(5.0), 0.0), None);
        assert_eq!(percentage(None, 20.0), None);
    }

    #[test]
    fn cutoff_drops_older_grades() {
        let course = CourseRef {
            id: 10,
            name: "Biology".to_string(),
        };
        let cutoff: DateTime<Utc> = "2024-03-01T00:00:00Z".parse().unwrap();
        let rows = course_graded_rows(
            &course,
            vec![
                graded("old", "2024-02-20T00:00:00Z", 8.0, 10.0),
                graded("recent", "2024-03-05T00:00:00Z", 6.0, 10.0),
            ],
            cutoff,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].assignment_name, "recent");
        assert_eq!(rows[0].percentage, Some(60));
    }
}
