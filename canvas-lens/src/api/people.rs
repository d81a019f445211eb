//! Canvas People API: course users by enrollment type.

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::User;

/// List users in a course filtered by enrollment type
/// (e.g. `["teacher", "ta"]`), with email and enrollments embedded.
pub async fn list_course_users(
    client: &CanvasClient,
    course_id: u64,
    enrollment_types: &[&str],
) -> Result<Vec<User>> {
    let query = Query::new()
        .repeated("enrollment_type", enrollment_types)
        .repeated("include", &["email", "enrollments"]);

    client
        .get_all(&format!("/courses/{course_id}/users"), &query)
        .await
}
