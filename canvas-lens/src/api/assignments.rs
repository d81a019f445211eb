//! Canvas Assignments API.

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::Assignment;

/// Server-side assignment buckets accepted by the `bucket` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentBucket {
    /// Past-due assignments
    Past,
    /// Past-due and not yet submitted
    Overdue,
    /// Assignments without a due date
    Undated,
    /// Submitted but not yet graded
    Ungraded,
    /// Not yet submitted
    Unsubmitted,
    /// Due soon
    Upcoming,
    /// Due beyond the upcoming window
    Future,
}

impl AssignmentBucket {
    /// Wire value of the bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentBucket::Past => "past",
            AssignmentBucket::Overdue => "overdue",
            AssignmentBucket::Undated => "undated",
            AssignmentBucket::Ungraded => "ungraded",
            AssignmentBucket::Unsubmitted => "unsubmitted",
            AssignmentBucket::Upcoming => "upcoming",
            AssignmentBucket::Future => "future",
        }
    }

    /// Parse a bucket name from CLI/tool input.
    pub fn parse(input: &str) -> Option<Self> {
        Some(match input {
            "past" => AssignmentBucket::Past,
            "overdue" => AssignmentBucket::Overdue,
            "undated" => AssignmentBucket::Undated,
            "ungraded" => AssignmentBucket::Ungraded,
            "unsubmitted" => AssignmentBucket::Unsubmitted,
            "upcoming" => AssignmentBucket::Upcoming,
            "future" => AssignmentBucket::Future,
            _ => return None,
        })
    }
}

/// Options for [`list_assignments`].
#[derive(Debug, Default, Clone)]
pub struct AssignmentOptions {
    /// Course to list assignments in
    pub course_id: u64,
    /// Server-side bucket filter
    pub bucket: Option<AssignmentBucket>,
    /// Name search term
    pub search_term: Option<String>,
    /// Embed the caller's submission on each assignment
    pub include_submission: bool,
    /// Order results by `due_at` instead of position
    pub order_by_due_at: bool,
}

/// List assignments for a course.
pub async fn list_assignments(
    client: &CanvasClient,
    options: &AssignmentOptions,
) -> Result<Vec<Assignment>> {
    let mut query = Query::new();
    if let Some(bucket) = options.bucket {
        query = query.scalar("bucket", bucket.as_str());
    }
    if let Some(term) = &options.search_term {
        query = query.scalar("search_term", term);
    }
    if options.include_submission {
        query = query.repeated("include", &["submission"]);
    }
    if options.order_by_due_at {
        query = query.scalar("order_by", "due_at");
    }

    client
        .get_all(&format!("/courses/{}/assignments", options.course_id), &query)
        .await
}
