//! Canvas Submissions API: per-course submission listings for a student.

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::Submission;

/// Options for [`list_submissions`].
#[derive(Debug, Clone)]
pub struct SubmissionOptions {
    /// Course to list submissions in
    pub course_id: u64,
    /// Students whose submissions to return (repeated `student_ids[]`)
    pub student_ids: Vec<u64>,
    /// Related data to embed (`include[]`), e.g. `assignment`,
    /// `submission_comments`
    pub include: Vec<String>,
    /// Restrict by workflow state, e.g. `graded`
    pub workflow_state: Option<String>,
}

impl SubmissionOptions {
    /// Submissions for one student with the assignment embedded — the
    /// shape every aggregation scan uses.
    pub fn for_student(course_id: u64, student_id: u64) -> Self {
        Self {
            course_id,
            student_ids: vec![student_id],
            include: vec!["assignment".to_string()],
            workflow_state: None,
        }
    }

    /// Also embed submission comments (`include[]=submission_comments`).
    pub fn with_comments(mut self) -> Self {
        self.include.push("submission_comments".to_string());
        self
    }
}

/// List submissions in a course for specific students.
pub async fn list_submissions(
    client: &CanvasClient,
    options: &SubmissionOptions,
) -> Result<Vec<Submission>> {
    let mut query = Query::new().repeated("student_ids", &options.student_ids);
    if !options.include.is_empty() {
        query = query.repeated("include", &options.include);
    }
    if let Some(state) = &options.workflow_state {
        query = query.scalar("workflow_state", state);
    }

    client
        .get_all(
            &format!("/courses/{}/students/submissions", options.course_id),
            &query,
        )
        .await
}

/// List graded submissions for a student in a course.
pub async fn list_graded_submissions(
    client: &CanvasClient,
    course_id: u64,
    student_id: u64,
) -> Result<Vec<Submission>> {
    list_submissions(
        client,
        &SubmissionOptions {
            workflow_state: Some("graded".to_string()),
            ..SubmissionOptions::for_student(course_id, student_id)
        },
    )
    .await
}
