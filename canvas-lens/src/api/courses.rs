//! Canvas Courses API: course listings, grading periods, and enrollments.

use futures::future::join_all;
use serde::Deserialize;

use crate::client::{CanvasClient, Query};
use crate::error::{Error, Result};
use crate::grading::current_grading_period;
use crate::types::{Course, Enrollment, GradingPeriod};

use super::users::UserRef;

/// Options for [`list_courses`].
#[derive(Debug, Default, Clone)]
pub struct ListCoursesOptions {
    /// Filter by the caller's enrollment state, e.g. `active`
    pub enrollment_state: Option<String>,
    /// Course workflow states to include, e.g. `available`
    pub states: Vec<String>,
    /// Related data to embed (`include[]`), e.g. `enrollments`, `term`
    pub include: Vec<String>,
}

impl ListCoursesOptions {
    /// The listing every aggregation starts from: the caller's active
    /// enrollments in available courses.
    pub fn active_available() -> Self {
        Self {
            enrollment_state: Some("active".to_string()),
            states: vec!["available".to_string()],
            ..Self::default()
        }
    }
}

/// List courses for the authenticated user.
pub async fn list_courses(
    client: &CanvasClient,
    options: &ListCoursesOptions,
) -> Result<Vec<Course>> {
    let mut query = Query::new();
    if let Some(state) = &options.enrollment_state {
        query = query.scalar("enrollment_state", state);
    }
    if !options.states.is_empty() {
        query = query.repeated("state", &options.states);
    }
    if !options.include.is_empty() {
        query = query.repeated("include", &options.include);
    }

    client.get_all("/courses", &query).await
}

/// Get a single course by id.
pub async fn get_course(client: &CanvasClient, course_id: u64) -> Result<Course> {
    client
        .get(&format!("/courses/{course_id}"), &Query::new())
        .await
}

/// Get a single course the caller can access, or a not-found error.
///
/// Canvas answers an id outside the caller's enrollment set with a 401,
/// 403, or 404 depending on the course's state; all three mean the same
/// thing to a caller who passed `--course-id`, so they collapse into
/// [`Error::NotFound`] here.
pub async fn require_course(client: &CanvasClient, course_id: u64) -> Result<Course> {
    match get_course(client, course_id).await {
        Err(Error::Api { status, .. }) if matches!(status, 401 | 403 | 404) => Err(
            Error::NotFound(format!("Course {course_id} not found or not accessible")),
        ),
        other => other,
    }
}

#[derive(Debug, Deserialize)]
struct GradingPeriodsResponse {
    #[serde(default)]
    grading_periods: Option<Vec<GradingPeriod>>,
}

/// List grading periods for a course.
///
/// Courses without grading periods configured respond with an error or an
/// empty envelope; both surface here as an empty list, never a failure.
pub async fn list_grading_periods(
    client: &CanvasClient,
    course_id: u64,
) -> Result<Vec<GradingPeriod>> {
    let path = format!("/courses/{course_id}/grading_periods");
    match client.get::<GradingPeriodsResponse>(&path, &Query::new()).await {
        Ok(response) => Ok(response.grading_periods.unwrap_or_default()),
        Err(err) => {
            tracing::debug!(course_id, %err, "no grading periods for course");
            Ok(Vec::new())
        }
    }
}

/// Options for [`list_course_enrollments`].
#[derive(Debug, Default, Clone)]
pub struct EnrollmentOptions {
    /// Enrollment types to include, e.g. `StudentEnrollment`
    pub types: Vec<String>,
    /// Restrict to a single user's enrollment
    pub user_id: Option<u64>,
    /// Scope grade totals to one grading period
    pub grading_period_id: Option<u64>,
}

/// List enrollments for a course. Grades are always embedded.
pub async fn list_course_enrollments(
    client: &CanvasClient,
    course_id: u64,
    options: &EnrollmentOptions,
) -> Result<Vec<Enrollment>> {
    let mut query = Query::new().repeated("include", &["grades"]);
    if !options.types.is_empty() {
        query = query.repeated("type", &options.types);
    }
    if let Some(user_id) = options.user_id {
        query = query.scalar("user_id", user_id);
    }
    if let Some(period_id) = options.grading_period_id {
        query = query.scalar("grading_period_id", period_id);
    }

    client
        .get_all(&format!("/courses/{course_id}/enrollments"), &query)
        .await
}

/// A course joined with the target student's enrollment and the grading
/// period the grades were scoped to.
#[derive(Debug, Clone)]
pub struct CourseWithGrades {
    /// The course record
    pub course: Course,
    /// The student's enrollment (with grades), when one could be found
    pub enrollment: Option<Enrollment>,
    /// The grading period the enrollment grades are scoped to
    pub grading_period_id: Option<u64>,
}

impl CourseWithGrades {
    /// Course id shorthand.
    pub fn id(&self) -> u64 {
        self.course.id
    }

    /// Course name shorthand.
    pub fn name(&self) -> &str {
        &self.course.name
    }
}

fn embedded_student_enrollment(course: &Course) -> Option<Enrollment> {
    course.enrollments.as_ref().and_then(|enrollments| {
        enrollments
            .iter()
            .find(|e| e.kind == "StudentEnrollment" || e.kind == "ObserverEnrollment")
            .cloned()
    })
}

const STUDENT_ENROLLMENT: &str = "StudentEnrollment";

/// List the student's active courses with grades scoped to the current
/// grading period.
///
/// Without a grading period filter Canvas may report cumulative grades
/// across all periods, which is not what the portal's "current grade"
/// widget shows. For each course the current period is resolved first and
/// the enrollment re-fetched with that filter; courses without periods
/// fall back to the enrollment embedded in the course listing.
///
/// For observer accounts querying a specific student, the student's
/// enrollment is never embedded in the observer's own course listing, so
/// it is always fetched separately scoped to the student's user id. That
/// is a hard rule of the Canvas API, not an optimization.
pub async fn list_courses_with_grades(
    client: &CanvasClient,
    student: &UserRef,
) -> Result<Vec<CourseWithGrades>> {
    let options = ListCoursesOptions {
        include: vec!["enrollments".to_string(), "term".to_string()],
        ..ListCoursesOptions::active_available()
    };
    let courses = list_courses(client, &options).await?;

    let fetches = courses.into_iter().map(|course| async move {
        match student {
            UserRef::Id(user_id) => observer_course_grades(client, course, *user_id).await,
            UserRef::Me => self_course_grades(client, course).await,
        }
    });

    Ok(join_all(fetches).await)
}

async fn observer_course_grades(
    client: &CanvasClient,
    course: Course,
    user_id: u64,
) -> CourseWithGrades {
    let course_id = course.id;
    let fetched: Result<(Option<Enrollment>, Option<u64>)> = async {
        let period = current_grading_period(client, course_id).await?;
        let enrollments = list_course_enrollments(
            client,
            course_id,
            &EnrollmentOptions {
                types: vec![STUDENT_ENROLLMENT.to_string()],
                user_id: Some(user_id),
                grading_period_id: period.as_ref().map(|p| p.id),
            },
        )
        .await?;
        Ok((enrollments.into_iter().next(), period.map(|p| p.id)))
    }
    .await;

    match fetched {
        Ok((enrollment, grading_period_id)) => CourseWithGrades {
            course,
            enrollment,
            grading_period_id,
        },
        Err(err) => {
            tracing::warn!(course_id, %err, "failed to fetch student enrollment");
            CourseWithGrades {
                course,
                enrollment: None,
                grading_period_id: None,
            }
        }
    }
}

async fn self_course_grades(client: &CanvasClient, course: Course) -> CourseWithGrades {
    let course_id = course.id;
    let fetched: Result<Option<(Option<Enrollment>, u64)>> = async {
        let period = match current_grading_period(client, course_id).await? {
            Some(period) => period,
            None => return Ok(None),
        };
        let enrollments = list_course_enrollments(
            client,
            course_id,
            &EnrollmentOptions {
                types: vec![STUDENT_ENROLLMENT.to_string()],
                grading_period_id: Some(period.id),
                ..EnrollmentOptions::default()
            },
        )
        .await?;
        Ok(Some((enrollments.into_iter().next(), period.id)))
    }
    .await;

    match fetched {
        Ok(Some((enrollment, period_id))) => CourseWithGrades {
            course,
            enrollment,
            grading_period_id: Some(period_id),
        },
        // No grading periods, or the period-scoped fetch failed: fall
        // back to the enrollment embedded in the course listing.
        Ok(None) | Err(_) => {
            let enrollment = embedded_student_enrollment(&course);
            CourseWithGrades {
                course,
                enrollment,
                grading_period_id: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::client::{Page, Transport};

    struct StatusTransport(u16);

    #[async_trait]
    impl Transport for StatusTransport {
        async fn get(&self, _url: &str, _query: &[(String, String)]) -> Result<Page> {
            Err(Error::Api {
                status: self.0,
                body: "{}".to_string(),
            })
        }
    }

    fn failing_client(status: u16) -> CanvasClient {
        CanvasClient::with_transport("https://canvas.test", Arc::new(StatusTransport(status)))
    }

    #[tokio::test]
    async fn inaccessible_course_surfaces_as_not_found() {
        for status in [401, 403, 404] {
            let err = require_course(&failing_client(status), 42).await.unwrap_err();
            match err {
                Error::NotFound(message) => {
                    assert_eq!(message, "Course 42 not found or not accessible");
                }
                other => panic!("expected NotFound for {status}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn server_errors_pass_through_unchanged() {
        let err = require_course(&failing_client(500), 42).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 500, .. }));
    }
}
