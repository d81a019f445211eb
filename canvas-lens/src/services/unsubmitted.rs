//! Client-derived unsubmitted past-due assignments.
//!
//! Canvas only flags a submission `missing` once its own rules fire, so
//! a second signal is derived here: scan every submission in every
//! active course and keep the ones that are past due with nothing
//! handed in. See [`super::missing`] for how the two signals merge.

use chrono::{DateTime, Utc};

use crate::api::submissions::{list_submissions, SubmissionOptions};
use crate::api::users::{resolve_user_id, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::grading::{current_grading_period, due_falls_in_period};
use crate::types::{GradingPeriod, Submission};

use super::fan_out::{fan_out_courses, CourseRef};
use super::missing::compare_due_desc;
use super::students::active_course_refs;
use super::types::UnsubmittedAssignment;

/// Options for [`unsubmitted_assignments`].
#[derive(Debug, Default, Clone)]
pub struct UnsubmittedOptions {
    /// Restrict to one course
    pub course_id: Option<u64>,
    /// Scan all grading periods instead of only the current one
    pub all_grading_periods: bool,
}

/// Scan the student's courses for past-due assignments with no
/// submission.
///
/// The submissions endpoint requires a concrete numeric student id, so
/// `self` is resolved up front. Per-course failures degrade to an empty
/// contribution.
pub async fn unsubmitted_assignments(
    client: &CanvasClient,
    student: &UserRef,
    options: &UnsubmittedOptions,
) -> Result<Vec<UnsubmittedAssignment>> {
    let student_id = resolve_user_id(client, student).await?;

    let courses: Vec<CourseRef> = match options.course_id {
        Some(course_id) => {
            let course = crate::api::courses::require_course(client, course_id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };

    let now = Utc::now();
    let all_periods = options.all_grading_periods;
    let fan_out = fan_out_courses(&courses, |course| async move {
        course_unsubmitted(client, course, student_id, now, all_periods).await
    })
    .await;

    let mut items = fan_out.into_data("unsubmitted");
    items.sort_by(|a, b| compare_due_desc(a.due_at, b.due_at));
    Ok(items)
}

async fn course_unsubmitted(
    client: &CanvasClient,
    course: &CourseRef,
    student_id: u64,
    now: DateTime<Utc>,
    all_grading_periods: bool,
) -> Result<Vec<UnsubmittedAssignment>> {
    let period = if all_grading_periods {
        None
    } else {
        current_grading_period(client, course.id).await?
    };

    let submissions = list_submissions(
        client,
        &SubmissionOptions::for_student(course.id, student_id),
    )
    .await?;

    Ok(submissions
        .into_iter()
        .filter(|sub| is_unsubmitted_past_due(sub, now))
        .filter(|sub| in_period(sub, period.as_ref()))
        .filter_map(|sub| {
            let assignment = sub.assignment?;
            Some(UnsubmittedAssignment {
                id: assignment.id,
                name: assignment.name,
                course_id: course.id,
                course_name: course.name.clone(),
                due_at: assignment.due_at,
                points_possible: assignment.points_possible,
                url: assignment.html_url,
            })
        })
        .collect())
}

/// Past due at `now`, nothing handed in, and no grade standing in for a
/// submission (paper or offline-graded work carries a score without a
/// `submitted_at`).
pub(crate) fn is_unsubmitted_past_due(sub: &Submission, now: DateTime<Utc>) -> bool {
    if sub.submitted_at.is_some() || sub.score.is_some() {
        return false;
    }
    match sub.assignment.as_ref().and_then(|a| a.due_at) {
        Some(due_at) => due_at < now,
        None => false,
    }
}

/// Does a submission belong to the given grading period?
///
/// `grading_period_id` is authoritative when present on both sides; when
/// the submission carries none the due date is checked against the
/// period's range. No period means no filter.
pub(crate) fn in_period(sub: &Submission, period: Option<&GradingPeriod>) -> bool {
    let Some(period) = period else {
        return true;
    };
    if let Some(period_id) = sub.grading_period_id {
        return period_id == period.id;
    }
    match sub.assignment.as_ref().and_then(|a| a.due_at) {
        Some(due_at) => due_falls_in_period(due_at, period),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Assignment;

    fn submission(
        due: Option<&str>,
        submitted: Option<&str>,
        score: Option<f64>,
        period_id: Option<u64>,
    ) -> Submission {
        Submission {
            assignment_id: 1,
            assignment: Some(Assignment {
                id: 1,
                name: "Essay".to_string(),
                course_id: 10,
                due_at: due.map(|d| d.parse().unwrap()),
                points_possible: Some(20.0),
                html_url: None,
                submission: None,
            }),
            submitted_at: submitted.map(|s| s.parse().unwrap()),
            graded_at: None,
            score,
            grade: None,
            late: false,
            missing: false,
            grading_period_id: period_id,
            workflow_state: None,
            submission_comments: None,
            html_url: None,
        }
    }

    fn period(id: u64, start: &str, end: &str) -> GradingPeriod {
        GradingPeriod {
            id,
            title: String::new(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            is_closed: false,
        }
    }

    const NOW: &str = "2024-03-01T00:00:00Z";

    #[test]
    fn past_due_with_no_submission_qualifies() {
        let sub = submission(Some("2024-02-20T00:00:00Z"), None, None, None);
        assert!(is_unsubmitted_past_due(&sub, NOW.parse().unwrap()));
    }

    #[test]
    fn submitted_scored_undated_and_future_items_do_not_qualify() {
        let now = NOW.parse().unwrap();
        let submitted = submission(
            Some("2024-02-20T00:00:00Z"),
            Some("2024-02-19T00:00:00Z"),
            None,
            None,
        );
        assert!(!is_unsubmitted_past_due(&submitted, now));

        // Paper submission: graded but never submitted online.
        let scored = submission(Some("2024-02-20T00:00:00Z"), None, Some(18.0), None);
        assert!(!is_unsubmitted_past_due(&scored, now));

        let undated = submission(None, None, None, None);
        assert!(!is_unsubmitted_past_due(&undated, now));

        let future = submission(Some("2024-03-10T00:00:00Z"), None, None, None);
        assert!(!is_unsubmitted_past_due(&future, now));
    }

    #[test]
    fn period_id_is_authoritative_when_present() {
        let p = period(7, "2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z");
        // Due date outside the period, but Canvas counted it in period 7.
        let sub = submission(Some("2023-12-01T00:00:00Z"), None, None, Some(7));
        assert!(in_period(&sub, Some(&p)));

        let other = submission(Some("2024-02-01T00:00:00Z"), None, None, Some(8));
        assert!(!in_period(&other, Some(&p)));
    }

    #[test]
    fn due_date_heuristic_applies_without_a_period_id() {
        let p = period(7, "2024-01-01T00:00:00Z", "2024-03-15T00:00:00Z");
        let inside = submission(Some("2024-02-01T00:00:00Z"), None, None, None);
        assert!(in_period(&inside, Some(&p)));

        // Boundary dates count as inside.
        let boundary = submission(Some("2024-03-15T00:00:00Z"), None, None, None);
        assert!(in_period(&boundary, Some(&p)));

        let outside = submission(Some("2024-03-16T00:00:00Z"), None, None, None);
        assert!(!in_period(&outside, Some(&p)));
    }

    #[test]
    fn no_period_means_no_filter() {
        let sub = submission(Some("2020-01-01T00:00:00Z"), None, None, None);
        assert!(in_period(&sub, None));
    }
}
