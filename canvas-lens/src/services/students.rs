//! Observed students, for parent/observer accounts.

use crate::api::courses::{list_courses, ListCoursesOptions};
use crate::api::users::list_observees;
use crate::client::CanvasClient;
use crate::error::Result;

use super::fan_out::CourseRef;
use super::types::ObservedStudent;

/// List the students the authenticated user observes, sorted by name.
pub async fn observed_students(client: &CanvasClient) -> Result<Vec<ObservedStudent>> {
    let mut students: Vec<ObservedStudent> = list_observees(client)
        .await?
        .into_iter()
        .map(|u| ObservedStudent {
            id: u.id,
            name: u.name,
            short_name: u.short_name,
            sortable_name: u.sortable_name,
        })
        .collect();

    students.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(students)
}

/// The caller's active courses as fan-out refs.
pub(crate) async fn active_course_refs(client: &CanvasClient) -> Result<Vec<CourseRef>> {
    let courses = list_courses(client, &ListCoursesOptions::active_available()).await?;
    Ok(courses.iter().map(CourseRef::from).collect())
}
