//! Stable output contracts for the aggregation services
//!
//! These shapes are shared by the CLI renderer, the MCP tools, and the
//! HTTP API; changing a field here changes all three surfaces at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course with its current-grading-period grades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseGrade {
    /// Course id
    pub id: u64,
    /// Course name
    pub name: String,
    /// Short course code
    pub course_code: String,
    /// Current score (period-scoped when a period was resolved)
    pub current_score: Option<f64>,
    /// Current letter grade
    pub current_grade: Option<String>,
    /// Final score
    pub final_score: Option<f64>,
    /// Final letter grade
    pub final_grade: Option<String>,
    /// Grading period the grades are scoped to, when one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grading_period_id: Option<u64>,
}

/// An assignment due inside a queried window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DueAssignment {
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Assignment id
    pub assignment_id: u64,
    /// Assignment name
    pub assignment_name: String,
    /// Due date
    pub due_at: DateTime<Utc>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Whether the student has submitted
    pub submitted: bool,
    /// Score, when graded
    pub score: Option<f64>,
    /// Grade string, when graded
    pub grade: Option<String>,
    /// Web URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An assignment the server has flagged missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingAssignment {
    /// Assignment id
    pub id: u64,
    /// Assignment name
    pub name: String,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Web URL
    pub url: String,
}

/// A past-due assignment with no submission, derived client-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnsubmittedAssignment {
    /// Assignment id
    pub id: u64,
    /// Assignment name
    pub name: String,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Web URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Which signal produced a [`MissingWorkItem`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkSource {
    /// Server-flagged missing submission
    Missing,
    /// Client-derived unsubmitted past-due
    Unsubmitted,
}

/// One row of the reconciled missing + unsubmitted view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingWorkItem {
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Assignment name (dedup key together with `course_id`)
    pub name: String,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Web URL
    pub url: String,
    /// Which signal this row came from
    pub source: WorkSource,
}

/// Per-course missing-assignment count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingCountByCourse {
    /// Course id
    pub course_id: u64,
    /// Course name
    pub course_name: String,
    /// Number of missing assignments
    pub count: usize,
}

/// A graded submission with derived percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradedAssignment {
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Assignment id
    pub assignment_id: u64,
    /// Assignment name
    pub assignment_name: String,
    /// When it was graded
    pub graded_at: Option<DateTime<Utc>>,
    /// Score
    pub score: Option<f64>,
    /// Maximum points
    pub points_possible: f64,
    /// Rounded percentage, when computable
    pub percentage: Option<i64>,
    /// Grade string
    pub grade: Option<String>,
    /// Whether the submission was late
    pub late: bool,
    /// Web URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A course announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnouncementItem {
    /// Announcement id
    pub id: u64,
    /// Title
    pub title: String,
    /// Body HTML
    pub message: String,
    /// When it was posted
    pub posted_at: DateTime<Utc>,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Author display name
    pub author_name: String,
    /// Web URL
    pub url: String,
}

/// An inbox conversation summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboxItem {
    /// Conversation id
    pub id: u64,
    /// Subject line
    pub subject: Option<String>,
    /// Preview of the most recent message
    pub last_message: Option<String>,
    /// Timestamp of the most recent message
    pub last_message_at: Option<DateTime<Utc>>,
    /// Message count
    pub message_count: u32,
    /// `read`, `unread`, or `archived`
    pub workflow_state: String,
    /// Participant names
    pub participants: Vec<String>,
    /// Course context name, when scoped
    pub context_name: Option<String>,
}

/// A non-assignment calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEventItem {
    /// Event id
    pub id: u64,
    /// Title
    pub title: String,
    /// Description, truncated for display
    pub description: Option<String>,
    /// Start time
    pub start_at: DateTime<Utc>,
    /// End time
    pub end_at: Option<DateTime<Utc>>,
    /// Location name
    pub location_name: Option<String>,
    /// Location address
    pub location_address: Option<String>,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Web URL
    pub url: String,
}

/// A discussion topic with participation counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscussionItem {
    /// Topic id
    pub id: u64,
    /// Title
    pub title: String,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// When the topic was posted, once it has been
    pub posted_at: Option<DateTime<Utc>>,
    /// Most recent reply, if any
    pub last_reply_at: Option<DateTime<Utc>>,
    /// `side_comment` or `threaded`
    pub discussion_type: Option<String>,
    /// Total reply count
    pub reply_count: u32,
    /// Unread reply count
    pub unread_count: u32,
    /// Whether the discussion is graded
    pub is_graded: bool,
    /// Whether students must post before seeing replies
    pub requires_initial_post: bool,
    /// Web URL
    pub url: String,
}

/// A course a person teaches, on a [`PersonItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonCourse {
    /// Course id
    pub id: u64,
    /// Course name
    pub name: String,
}

/// A teacher or TA, deduplicated across courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonItem {
    /// Display name
    pub name: String,
    /// `Teacher` or `TA`
    pub role: String,
    /// Email, when visible
    pub email: Option<String>,
    /// Courses this person appears in, sorted by name
    pub courses: Vec<PersonCourse>,
}

/// A planner to-do entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    /// Owning course name
    pub course_name: String,
    /// Title of the activity
    pub title: String,
    /// Plannable type, e.g. `assignment`, `quiz`
    #[serde(rename = "type")]
    pub kind: String,
    /// Planned (due) date
    pub due_at: DateTime<Utc>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Whether submitted
    pub submitted: bool,
    /// Whether the server flags it missing
    pub missing: bool,
    /// Whether graded
    pub graded: bool,
    /// Web URL
    pub url: String,
}

/// An upcoming assignment in one course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAssignment {
    /// Assignment id
    pub id: u64,
    /// Assignment name
    pub name: String,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Whether the student has submitted
    pub submitted: bool,
    /// Web URL
    pub url: String,
}

/// One course's upcoming assignments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseUpcoming {
    /// Course id
    pub course_id: u64,
    /// Course name
    pub course_name: String,
    /// Upcoming assignments, soonest first
    pub assignments: Vec<UpcomingAssignment>,
}

/// An entry from the user-level upcoming feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingEventItem {
    /// `assignment` or `event`
    #[serde(rename = "type")]
    pub kind: String,
    /// Title
    pub title: String,
    /// Start time
    pub start_at: DateTime<Utc>,
    /// Owning course id, when the context is a course
    pub course_id: Option<u64>,
    /// Web URL
    pub url: String,
}

/// One row of an assignment listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentRow {
    /// Assignment id
    pub id: u64,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Assignment name
    pub name: String,
    /// Due date
    pub due_at: Option<DateTime<Utc>>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Score, when graded
    pub score: Option<f64>,
    /// Grade string, when graded
    pub grade: Option<String>,
    /// Whether the student has submitted
    pub submitted: bool,
    /// Web URL
    pub url: String,
}

/// Announcements and inbox joined into one view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherCommunications {
    /// Recent announcements
    pub announcements: Vec<AnnouncementItem>,
    /// Inbox conversations
    pub inbox: Vec<InboxItem>,
}

/// Headline counts on a [`ComprehensiveStatus`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSummary {
    /// Number of active courses
    pub total_courses: usize,
    /// Number of server-flagged missing assignments
    pub missing_assignments: usize,
    /// Number of assignments due in the upcoming window
    pub upcoming_assignments: usize,
    /// Number of recent grades below the threshold
    pub recent_low_grades: usize,
}

/// One course line on a [`ComprehensiveStatus`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseStatusLine {
    /// Course id
    pub id: u64,
    /// Course name
    pub name: String,
    /// Current score
    pub current_score: Option<f64>,
    /// Current letter grade
    pub current_grade: Option<String>,
    /// Final score
    pub final_score: Option<f64>,
    /// Final letter grade
    pub final_grade: Option<String>,
}

/// The full academic status overview returned by the status service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComprehensiveStatus {
    /// Headline counts
    pub summary: StatusSummary,
    /// Per-course grade lines
    pub courses: Vec<CourseStatusLine>,
    /// Server-flagged missing assignments
    pub missing_assignments: Vec<MissingAssignment>,
    /// Assignments due in the upcoming window
    pub upcoming_assignments: Vec<DueAssignment>,
    /// Recent grades below the low-grade threshold
    pub recent_low_grades: Vec<GradedAssignment>,
}

/// Late/missing statistics for one course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseStats {
    /// Course id
    pub course_id: u64,
    /// Course name
    pub course_name: String,
    /// Submissions with an associated assignment
    pub total: usize,
    /// Late submissions
    pub late: usize,
    /// Server-flagged missing assignments
    pub missing: usize,
    /// Late percentage, one decimal place; 0 when `total` is 0
    pub late_pct: f64,
    /// Missing percentage, one decimal place; 0 when `total` is 0
    pub missing_pct: f64,
}

/// An observed student, for parent/observer accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservedStudent {
    /// Student user id
    pub id: u64,
    /// Full display name
    pub name: String,
    /// Short display name
    pub short_name: Option<String>,
    /// Name in sortable form
    pub sortable_name: Option<String>,
}

/// One student's status inside a multi-student overview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentStatus {
    /// Student display name
    pub student_name: String,
    /// Student user id
    pub student_id: u64,
    /// The student's full status
    pub status: ComprehensiveStatus,
}

/// One teacher comment on a submission, inside a queried window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackItem {
    /// Assignment id
    pub assignment_id: u64,
    /// Assignment name
    pub assignment_name: String,
    /// Owning course id
    pub course_id: u64,
    /// Owning course name
    pub course_name: String,
    /// Comment text
    pub comment_text: String,
    /// Comment author display name
    pub author_name: String,
    /// When the comment was created
    pub comment_date: DateTime<Utc>,
    /// The student's score on the submission
    pub student_score: Option<f64>,
    /// Maximum points
    pub points_possible: Option<f64>,
    /// Grade string
    pub grade: Option<String>,
    /// Web URL
    pub url: String,
}
