//! Canvas Users API: identity resolution, missing submissions, planner
//! items, upcoming events, and observees.

use chrono::NaiveDate;
use std::fmt;

use crate::client::{CanvasClient, Query};
use crate::error::{Error, Result};
use crate::types::{MissingSubmission, PlannerItem, UpcomingEvent, User};

/// A user reference as accepted by Canvas URL paths: either the literal
/// `self` token for the authenticated caller or a concrete numeric id.
///
/// Some endpoints accept `self`, others require a numeric id; keeping the
/// distinction in the type forces callers to resolve explicitly where it
/// matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRef {
    /// The authenticated caller (`self` in URL paths)
    Me,
    /// A concrete user id, e.g. an observed student
    Id(u64),
}

impl UserRef {
    /// Parse a user reference from CLI/tool input.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "self" {
            return Ok(UserRef::Me);
        }
        trimmed
            .parse::<u64>()
            .map(UserRef::Id)
            .map_err(|_| Error::Config(format!("invalid student id: {input:?}")))
    }

    /// True when this refers to the authenticated caller.
    pub fn is_me(&self) -> bool {
        matches!(self, UserRef::Me)
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Me => write!(f, "self"),
            UserRef::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for UserRef {
    fn from(id: u64) -> Self {
        UserRef::Id(id)
    }
}

/// Resolve a user reference to a concrete numeric id.
///
/// `self` is resolved through a who-am-I call; numeric ids pass through
/// without a request.
pub async fn resolve_user_id(client: &CanvasClient, user: &UserRef) -> Result<u64> {
    match user {
        UserRef::Id(id) => Ok(*id),
        UserRef::Me => {
            let me: User = client.get("/users/self", &Query::new()).await?;
            Ok(me.id)
        }
    }
}

/// Pick the student to act on: an explicit argument wins, then the
/// configured default, then the authenticated caller.
pub fn effective_student(explicit: Option<&str>, configured: Option<&str>) -> Result<UserRef> {
    match explicit.or(configured) {
        Some(value) => UserRef::parse(value),
        None => Ok(UserRef::Me),
    }
}

/// Options for [`get_missing_submissions`].
#[derive(Debug, Default, Clone)]
pub struct MissingSubmissionsOptions {
    /// Restrict to specific course ids (repeated `course_ids[]`)
    pub course_ids: Vec<u64>,
    /// Embed the owning course on each item (`include[]=course`)
    pub include_course: bool,
    /// Restrict to the current grading period
    /// (`filter[]=current_grading_period`)
    pub current_grading_period: bool,
}

/// Get assignments the server has flagged missing for a student.
///
/// The student id goes in the URL path — for observer accounts the
/// `observed_user_id` query parameter does NOT work on this endpoint, so
/// pass the student's numeric id as `user`.
pub async fn get_missing_submissions(
    client: &CanvasClient,
    user: &UserRef,
    options: &MissingSubmissionsOptions,
) -> Result<Vec<MissingSubmission>> {
    let mut query = Query::new();
    if !options.course_ids.is_empty() {
        query = query.repeated("course_ids", &options.course_ids);
    }
    if options.include_course {
        query = query.repeated("include", &["course"]);
    }
    if options.current_grading_period {
        query = query.repeated("filter", &["current_grading_period"]);
    }

    client
        .get_all(&format!("/users/{user}/missing_submissions"), &query)
        .await
}

/// Options for [`get_planner_items`].
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Window start (inclusive)
    pub start_date: NaiveDate,
    /// Window end (inclusive)
    pub end_date: NaiveDate,
}

/// Planner response envelope differs per user scope; observers query
/// through the `observed_user_id` parameter on their own planner.
pub async fn get_planner_items(
    client: &CanvasClient,
    user: &UserRef,
    options: &PlannerOptions,
) -> Result<Vec<PlannerItem>> {
    let mut query = Query::new()
        .scalar("start_date", options.start_date)
        .scalar("end_date", options.end_date);
    if let UserRef::Id(id) = user {
        query = query.scalar("observed_user_id", id);
    }

    client.get_all("/planner/items", &query).await
}

/// Get upcoming events (assignments and calendar events) for a user.
pub async fn get_upcoming_events(
    client: &CanvasClient,
    user: &UserRef,
) -> Result<Vec<UpcomingEvent>> {
    client
        .get_all(&format!("/users/{user}/upcoming_events"), &Query::new())
        .await
}

/// List students being observed by the current user (parent accounts).
pub async fn list_observees(client: &CanvasClient) -> Result<Vec<User>> {
    client.get_all("/users/self/observees", &Query::new()).await
}

/// Fetch the authenticated caller's own user record.
pub async fn whoami(client: &CanvasClient) -> Result<User> {
    client.get("/users/self", &Query::new()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_self_and_numeric_refs() {
        assert_eq!(UserRef::parse("self").unwrap(), UserRef::Me);
        assert_eq!(UserRef::parse("").unwrap(), UserRef::Me);
        assert_eq!(UserRef::parse(" 42 ").unwrap(), UserRef::Id(42));
        assert!(UserRef::parse("bob").is_err());
    }

    #[test]
    fn user_ref_displays_as_path_segment() {
        assert_eq!(UserRef::Me.to_string(), "self");
        assert_eq!(UserRef::Id(77).to_string(), "77");
    }

    #[test]
    fn effective_student_precedence() {
        // Explicit beats configured beats self.
        assert_eq!(
            effective_student(Some("5"), Some("9")).unwrap(),
            UserRef::Id(5)
        );
        assert_eq!(
            effective_student(None, Some("9")).unwrap(),
            UserRef::Id(9)
        );
        assert_eq!(effective_student(None, None).unwrap(), UserRef::Me);
        assert_eq!(
            effective_student(None, Some("self")).unwrap(),
            UserRef::Me
        );
    }
}
