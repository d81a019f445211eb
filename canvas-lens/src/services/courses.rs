//! Course listing with current-grading-period grades.

use crate::api::courses::list_courses_with_grades;
use crate::api::users::UserRef;
use crate::client::CanvasClient;
use crate::error::Result;

use super::types::CourseGrade;

/// List the student's active courses with period-scoped grades.
pub async fn course_grades(client: &CanvasClient, student: &UserRef) -> Result<Vec<CourseGrade>> {
    let courses = list_courses_with_grades(client, student).await?;

    Ok(courses
        .into_iter()
        .map(|c| {
            let grades = c.enrollment.as_ref().and_then(|e| e.grades.clone());
            CourseGrade {
                id: c.course.id,
                name: c.course.name,
                course_code: c.course.course_code,
                current_score: grades.as_ref().and_then(|g| g.current_score),
                current_grade: grades.as_ref().and_then(|g| g.current_grade.clone()),
                final_score: grades.as_ref().and_then(|g| g.final_score),
                final_grade: grades.as_ref().and_then(|g| g.final_grade.clone()),
                grading_period_id: c.grading_period_id,
            }
        })
        .collect())
}
