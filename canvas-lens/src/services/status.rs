//! The comprehensive academic status overview.

use futures::future::join_all;

use crate::api::users::UserRef;
use crate::client::CanvasClient;
use crate::error::Result;

use super::courses::course_grades;
use super::due::{due_assignments, DueOptions};
use super::grades::{recent_grades, GradesOptions};
use super::missing::{missing_assignments, MissingOptions};
use super::students::observed_students;
use super::types::{
    ComprehensiveStatus, CourseStatusLine, StatusSummary, StudentStatus,
};

/// Options for [`comprehensive_status`].
#[derive(Debug, Clone)]
pub struct StatusOptions {
    /// Upcoming-assignment window in days
    pub upcoming_days: i64,
    /// Look-back window for recent grades in days
    pub grade_days: i64,
    /// Grades strictly below this percentage count as low
    pub low_grade_threshold: f64,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            upcoming_days: 7,
            grade_days: 14,
            low_grade_threshold: 70.0,
        }
    }
}

/// Assemble the full status overview: per-course grades, missing work,
/// the upcoming week, and recent low grades, with headline counts.
///
/// The four sections are fetched concurrently; any one failing fails the
/// whole overview, since a partial status is worse than an error here.
pub async fn comprehensive_status(
    client: &CanvasClient,
    student: &UserRef,
    options: &StatusOptions,
) -> Result<ComprehensiveStatus> {
    let (courses, missing, upcoming, graded) = futures::future::try_join4(
        course_grades(client, student),
        missing_assignments(client, student, &MissingOptions::default()),
        due_assignments(
            client,
            student,
            &DueOptions {
                days: options.upcoming_days,
                hide_graded: false,
            },
        ),
        recent_grades(
            client,
            student,
            &GradesOptions {
                days: options.grade_days,
                below_percentage: Some(options.low_grade_threshold),
            },
        ),
    )
    .await?;

    let course_lines: Vec<CourseStatusLine> = courses
        .into_iter()
        .map(|c| CourseStatusLine {
            id: c.id,
            name: c.name,
            current_score: c.current_score,
            current_grade: c.current_grade,
            final_score: c.final_score,
            final_grade: c.final_grade,
        })
        .collect();

    Ok(ComprehensiveStatus {
        summary: StatusSummary {
            total_courses: course_lines.len(),
            missing_assignments: missing.len(),
            upcoming_assignments: upcoming.len(),
            recent_low_grades: graded.len(),
        },
        courses: course_lines,
        missing_assignments: missing,
        upcoming_assignments: upcoming,
        recent_low_grades: graded,
    })
}

/// One status overview per observed student, labeled by name.
///
/// Students degrade independently: a student whose status cannot be
/// assembled is skipped with a warning rather than failing the siblings.
pub async fn multi_student_status(
    client: &CanvasClient,
    options: &StatusOptions,
) -> Result<Vec<StudentStatus>> {
    let students = observed_students(client).await?;

    let fetches = students.iter().map(|student| async move {
        let status =
            comprehensive_status(client, &UserRef::Id(student.id), options).await;
        (student, status)
    });

    let mut statuses = Vec::new();
    for (student, status) in join_all(fetches).await {
        match status {
            Ok(status) => statuses.push(StudentStatus {
                student_name: student.name.clone(),
                student_id: student.id,
                status,
            }),
            Err(err) => {
                tracing::warn!(
                    student_id = student.id,
                    %err,
                    "skipping student in multi-student status"
                );
            }
        }
    }
    Ok(statuses)
}
