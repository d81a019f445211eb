//! Fan-out-per-course aggregation primitive
//!
//! Every multi-course feature follows the same loop: list the student's
//! courses, issue one request per course in parallel, and flatten. This
//! module defines that loop exactly once so the failure-handling and
//! flattening policy cannot drift between features.
//!
//! Per-course failures do not abort the aggregation: a course that fails
//! (a 403 from a restricted course is the common case) contributes
//! nothing, and the failure is recorded on the [`FanOut`] result and
//! logged at warn level so degraded results are at least observable.

use std::future::Future;

use futures::future::join_all;

use crate::api::courses::CourseWithGrades;
use crate::error::Result;
use crate::types::Course;

/// The (id, name) pair a per-course fetch needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRef {
    /// Course id
    pub id: u64,
    /// Course display name
    pub name: String,
}

impl From<&Course> for CourseRef {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
        }
    }
}

impl From<&CourseWithGrades> for CourseRef {
    fn from(course: &CourseWithGrades) -> Self {
        Self {
            id: course.id(),
            name: course.name().to_string(),
        }
    }
}

/// A per-course fetch that failed during a fan-out.
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
pub struct CourseFailure {
    /// Course whose fetch failed
    pub course_id: u64,
    /// Error message, stringified
    pub error: String,
}

/// Joined fan-out result: the flattened data plus every per-course
/// failure that was downgraded to "no data".
#[derive(Debug, Clone)]
pub struct FanOut<T> {
    /// Flattened per-course results, in course order
    pub data: Vec<T>,
    /// Courses whose fetch failed
    pub failures: Vec<CourseFailure>,
}

impl<T> FanOut<T> {
    /// Log every recorded failure at warn level and return the data.
    pub fn into_data(self, what: &str) -> Vec<T> {
        for failure in &self.failures {
            tracing::warn!(
                course_id = failure.course_id,
                error = %failure.error,
                "skipping course during {what} aggregation"
            );
        }
        self.data
    }
}

/// Run one fetch per course in parallel and join.
///
/// Each fetch returns the course's contribution; failures are captured
/// per course and never cancel the siblings. Results keep course order
/// (the order of `courses`), with each course's items contiguous.
pub async fn fan_out_courses<'a, T, F, Fut>(courses: &'a [CourseRef], fetch: F) -> FanOut<T>
where
    F: Fn(&'a CourseRef) -> Fut,
    Fut: Future<Output = Result<Vec<T>>> + 'a,
{
    let results = join_all(courses.iter().map(&fetch)).await;

    let mut data = Vec::new();
    let mut failures = Vec::new();
    for (course, result) in courses.iter().zip(results) {
        match result {
            Ok(mut items) => data.append(&mut items),
            Err(err) => failures.push(CourseFailure {
                course_id: course.id,
                error: err.to_string(),
            }),
        }
    }

    FanOut { data, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn refs(ids: &[u64]) -> Vec<CourseRef> {
        ids.iter()
            .map(|id| CourseRef {
                id: *id,
                name: format!("Course {id}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn one_failing_course_does_not_poison_the_join() {
        let courses = refs(&[1, 2, 3, 4, 5]);
        let result = fan_out_courses(&courses, |course| {
            let id = course.id;
            async move {
                if id == 3 {
                    Err(Error::Api {
                        status: 403,
                        body: "forbidden".to_string(),
                    })
                } else {
                    Ok(vec![id * 10, id * 10 + 1])
                }
            }
        })
        .await;

        assert_eq!(result.data, vec![10, 11, 20, 21, 40, 41, 50, 51]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].course_id, 3);
        assert!(result.failures[0].error.contains("403"));
    }

    #[tokio::test]
    async fn results_preserve_course_order() {
        let courses = refs(&[9, 1, 5]);
        let result = fan_out_courses(&courses, |course| {
            let id = course.id;
            async move { Ok(vec![id]) }
        })
        .await;
        assert_eq!(result.data, vec![9, 1, 5]);
        assert!(result.failures.is_empty());
    }
}
