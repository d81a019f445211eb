//! Canvas wire types
//!
//! Read-only projections of remote LMS state, deserialized straight from
//! API responses. Nothing here is persisted; every value lives only for
//! the duration of the aggregation call that fetched it.
//!
//! Canvas omits or nulls many fields depending on the caller's role and
//! the `include[]` parameters, so anything not guaranteed by the API is
//! an `Option` or defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course, optionally with embedded enrollments from
/// `include[]=enrollments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Canvas course id
    pub id: u64,
    /// Course display name
    #[serde(default)]
    pub name: String,
    /// Short course code
    #[serde(default)]
    pub course_code: String,
    /// Enrollment state for the requesting user
    #[serde(default)]
    pub enrollment_state: Option<String>,
    /// Enrollments embedded via `include[]=enrollments`
    #[serde(default)]
    pub enrollments: Option<Vec<Enrollment>>,
}

/// An enrollment of one user in one course, with grade info when fetched
/// with `include[]=grades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment type, e.g. `StudentEnrollment`, `ObserverEnrollment`,
    /// `TaEnrollment`, `TeacherEnrollment`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Id of the enrolled user
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Grade summary for this enrollment
    #[serde(default)]
    pub grades: Option<Grades>,
}

/// Current and final grade summary on an enrollment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grades {
    /// Current score (0-100), grading-period-scoped when the enrollment
    /// was fetched with a `grading_period_id` filter
    pub current_score: Option<f64>,
    /// Current letter grade
    pub current_grade: Option<String>,
    /// Final score
    pub final_score: Option<f64>,
    /// Final letter grade
    pub final_grade: Option<String>,
}

/// A date-bounded grading segment of a term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingPeriod {
    /// Grading period id
    pub id: u64,
    /// Display title, e.g. "Semester 2"
    #[serde(default)]
    pub title: String,
    /// Period start (inclusive)
    pub start_date: DateTime<Utc>,
    /// Period end (inclusive)
    pub end_date: DateTime<Utc>,
    /// Whether the period is closed for grading
    #[serde(default)]
    pub is_closed: bool,
}

/// An assignment, optionally with the queried user's submission embedded
/// via `include[]=submission`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment id
    pub id: u64,
    /// Assignment name
    #[serde(default)]
    pub name: String,
    /// Owning course id
    #[serde(default)]
    pub course_id: u64,
    /// Due date; undated assignments exist
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points, when the assignment is point-graded
    #[serde(default)]
    pub points_possible: Option<f64>,
    /// Web URL of the assignment
    #[serde(default)]
    pub html_url: Option<String>,
    /// The queried user's submission, via `include[]=submission`
    #[serde(default)]
    pub submission: Option<Box<Submission>>,
}

/// A user's submission for one assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Id of the assignment this submission belongs to
    #[serde(default)]
    pub assignment_id: u64,
    /// The assignment, via `include[]=assignment`
    #[serde(default)]
    pub assignment: Option<Assignment>,
    /// When the student submitted, if they have
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the submission was graded, if it has been
    #[serde(default)]
    pub graded_at: Option<DateTime<Utc>>,
    /// Numeric score
    #[serde(default)]
    pub score: Option<f64>,
    /// Grade as a string; may be a letter or a numeral
    #[serde(default)]
    pub grade: Option<String>,
    /// Server-side late flag
    #[serde(default)]
    pub late: bool,
    /// Server-side missing flag
    #[serde(default)]
    pub missing: bool,
    /// Grading period this submission was counted in, when Canvas knows
    #[serde(default)]
    pub grading_period_id: Option<u64>,
    /// Submission workflow state, e.g. `graded`, `unsubmitted`
    #[serde(default)]
    pub workflow_state: Option<String>,
    /// Teacher/peer comments, via `include[]=submission_comments`
    #[serde(default)]
    pub submission_comments: Option<Vec<SubmissionComment>>,
    /// Web URL of the submission
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A comment left on a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionComment {
    /// Comment text
    #[serde(default)]
    pub comment: String,
    /// Display name of the comment author
    #[serde(default)]
    pub author_name: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

/// An assignment the server itself has flagged missing for a user,
/// from `/users/{id}/missing_submissions`.
///
/// Distinct from client-derived "unsubmitted past-due"; the two signals
/// overlap but neither is a superset of the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingSubmission {
    /// Assignment id
    pub id: u64,
    /// Assignment name
    #[serde(default)]
    pub name: String,
    /// Owning course id
    #[serde(default)]
    pub course_id: u64,
    /// Due date
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    #[serde(default)]
    pub points_possible: Option<f64>,
    /// Web URL
    #[serde(default)]
    pub html_url: Option<String>,
    /// The owning course, via `include[]=course`
    #[serde(default)]
    pub course: Option<Course>,
}

/// A planner (to-do) item for any plannable activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerItem {
    /// Name of the owning context (usually the course name)
    #[serde(default)]
    pub context_name: Option<String>,
    /// Kind of plannable, e.g. `assignment`, `quiz`
    #[serde(default)]
    pub plannable_type: String,
    /// The plannable activity itself
    pub plannable: Plannable,
    /// Date the item is planned for (usually the due date)
    pub plannable_date: DateTime<Utc>,
    /// Submission status booleans. Canvas serializes this as `false`
    /// when there is no submission context, so it needs a lenient decode.
    #[serde(default, deserialize_with = "submissions_or_false")]
    pub submissions: Option<PlannerSubmissionStatus>,
    /// Web URL
    #[serde(default)]
    pub html_url: Option<String>,
}

/// The activity a planner item points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plannable {
    /// Title of the activity
    #[serde(default)]
    pub title: String,
    /// Maximum points, when gradable
    #[serde(default)]
    pub points_possible: Option<f64>,
}

/// Submission status booleans on a planner item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerSubmissionStatus {
    /// Whether the student has submitted
    #[serde(default)]
    pub submitted: bool,
    /// Whether the server considers it missing
    #[serde(default)]
    pub missing: bool,
    /// Whether it has been graded
    #[serde(default)]
    pub graded: bool,
}

fn submissions_or_false<'de, D>(de: D) -> Result<Option<PlannerSubmissionStatus>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrStatus {
        Absent(bool),
        Present(PlannerSubmissionStatus),
    }

    Ok(match Option::<BoolOrStatus>::deserialize(de)? {
        Some(BoolOrStatus::Present(status)) => Some(status),
        _ => None,
    })
}

/// A course announcement from `/announcements`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    /// Announcement id
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Body HTML
    #[serde(default)]
    pub message: String,
    /// When it was posted; null while a delayed announcement is pending
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// Owning context code, e.g. `course_123`
    #[serde(default)]
    pub context_code: String,
    /// Author info
    #[serde(default)]
    pub author: AnnouncementAuthor,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
}

/// Author block on an announcement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementAuthor {
    /// Author display name
    #[serde(default)]
    pub display_name: String,
}

/// A calendar event from `/calendar_events`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event id
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Description HTML
    #[serde(default)]
    pub description: Option<String>,
    /// Start time; all-day placeholder events can lack one
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
    /// End time
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
    /// Location name
    #[serde(default)]
    pub location_name: Option<String>,
    /// Location street address
    #[serde(default)]
    pub location_address: Option<String>,
    /// Owning context code, e.g. `course_123`
    #[serde(default)]
    pub context_code: String,
    /// Workflow state, e.g. `active`
    #[serde(default)]
    pub workflow_state: String,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
}

/// An inbox conversation from `/conversations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation id
    pub id: u64,
    /// Subject line
    #[serde(default)]
    pub subject: Option<String>,
    /// Preview of the most recent message
    #[serde(default)]
    pub last_message: Option<String>,
    /// Timestamp of the most recent message
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    /// Number of messages in the conversation
    #[serde(default)]
    pub message_count: u32,
    /// `read`, `unread`, or `archived`
    #[serde(default)]
    pub workflow_state: String,
    /// Conversation participants
    #[serde(default)]
    pub participants: Vec<ConversationParticipant>,
    /// Name of the owning context (course), when scoped
    #[serde(default)]
    pub context_name: Option<String>,
}

/// A participant in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationParticipant {
    /// Participant display name
    #[serde(default)]
    pub name: String,
}

/// A discussion topic from `/courses/{id}/discussion_topics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionTopic {
    /// Topic id
    pub id: u64,
    /// Title
    #[serde(default)]
    pub title: String,
    /// When the topic was posted; null until a delayed topic goes live
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// Most recent reply, if any
    #[serde(default)]
    pub last_reply_at: Option<DateTime<Utc>>,
    /// `side_comment` or `threaded`
    #[serde(default)]
    pub discussion_type: Option<String>,
    /// Total reply count
    #[serde(default)]
    pub discussion_subentry_count: u32,
    /// Unread reply count for the caller
    #[serde(default)]
    pub unread_count: u32,
    /// Linked assignment id when the discussion is graded
    #[serde(default)]
    pub assignment_id: Option<u64>,
    /// Whether students must post before seeing replies
    #[serde(default)]
    pub require_initial_post: bool,
    /// Web URL
    #[serde(default)]
    pub html_url: String,
}

/// A user record; observees, course instructors, and "who am I" all
/// deserialize into this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: u64,
    /// Full display name
    #[serde(default)]
    pub name: String,
    /// Short display name
    #[serde(default)]
    pub short_name: Option<String>,
    /// Name in sortable form ("Last, First")
    #[serde(default)]
    pub sortable_name: Option<String>,
    /// Email, via `include[]=email`
    #[serde(default)]
    pub email: Option<String>,
    /// Enrollments in the queried course, via `include[]=enrollments`
    #[serde(default)]
    pub enrollments: Option<Vec<Enrollment>>,
}

/// An entry from `/users/{id}/upcoming_events` — either an assignment or
/// a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingEvent {
    /// `assignment` or `event`
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Title
    #[serde(default)]
    pub title: String,
    /// Start time
    pub start_at: DateTime<Utc>,
    /// Owning context code, e.g. `course_123`
    #[serde(default)]
    pub context_code: Option<String>,
    /// Web URL
    #[serde(default)]
    pub html_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_item_tolerates_boolean_submissions_field() {
        let json = r#"{
            "context_name": "Biology",
            "plannable_type": "assignment",
            "plannable": {"title": "Lab 1", "points_possible": 10},
            "plannable_date": "2024-03-04T23:59:00Z",
            "submissions": false
        }"#;
        let item: PlannerItem = serde_json::from_str(json).unwrap();
        assert!(item.submissions.is_none());

        let json = r#"{
            "plannable_type": "quiz",
            "plannable": {"title": "Quiz 2"},
            "plannable_date": "2024-03-05T23:59:00Z",
            "submissions": {"submitted": true, "missing": false, "graded": true}
        }"#;
        let item: PlannerItem = serde_json::from_str(json).unwrap();
        let status = item.submissions.unwrap();
        assert!(status.submitted);
        assert!(status.graded);
    }

    #[test]
    fn pending_announcements_and_undated_events_decode() {
        // Delayed announcements null their posted_at until they go live.
        let a: Announcement =
            serde_json::from_str(r#"{"id": 1, "title": "Field trip", "posted_at": null}"#).unwrap();
        assert!(a.posted_at.is_none());

        let e: CalendarEvent =
            serde_json::from_str(r#"{"id": 2, "title": "Spirit week"}"#).unwrap();
        assert!(e.start_at.is_none());

        let t: DiscussionTopic =
            serde_json::from_str(r#"{"id": 3, "title": "Week 5", "posted_at": null}"#).unwrap();
        assert!(t.posted_at.is_none());
    }

    #[test]
    fn submission_defaults_cover_sparse_payloads() {
        let sub: Submission = serde_json::from_str(r#"{"assignment_id": 5}"#).unwrap();
        assert_eq!(sub.assignment_id, 5);
        assert!(!sub.late);
        assert!(!sub.missing);
        assert!(sub.score.is_none());
        assert!(sub.grading_period_id.is_none());
    }

    #[test]
    fn enrollment_type_field_maps_to_kind() {
        let e: Enrollment =
            serde_json::from_str(r#"{"type": "TaEnrollment", "user_id": 3}"#).unwrap();
        assert_eq!(e.kind, "TaEnrollment");
    }
}
