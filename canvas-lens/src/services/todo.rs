//! Planner-backed to-do list.

use chrono::{DateTime, Duration, Utc};

use crate::api::users::{get_planner_items, PlannerOptions, UserRef};
use crate::client::CanvasClient;
use crate::error::Result;
use crate::types::PlannerItem;

use super::types::TodoItem;

/// Options for [`todo_items`].
#[derive(Debug, Clone)]
pub struct TodoOptions {
    /// Window length in days, starting today
    pub days: i64,
    /// Drop items the student has already submitted
    pub hide_submitted: bool,
}

impl Default for TodoOptions {
    fn default() -> Self {
        Self {
            days: 7,
            hide_submitted: false,
        }
    }
}

/// List planner items between today and today + `days`, soonest first.
pub async fn todo_items(
    client: &CanvasClient,
    student: &UserRef,
    options: &TodoOptions,
) -> Result<Vec<TodoItem>> {
    todo_items_at(client, student, options, Utc::now()).await
}

/// [`todo_items`] with an explicit clock.
pub async fn todo_items_at(
    client: &CanvasClient,
    student: &UserRef,
    options: &TodoOptions,
    now: DateTime<Utc>,
) -> Result<Vec<TodoItem>> {
    let items = get_planner_items(
        client,
        student,
        &PlannerOptions {
            start_date: now.date_naive(),
            end_date: (now + Duration::days(options.days)).date_naive(),
        },
    )
    .await?;

    let mut todos: Vec<TodoItem> = items.into_iter().map(todo_row).collect();
    if options.hide_submitted {
        todos.retain(|t| !t.submitted);
    }
    todos.sort_by(|a, b| a.due_at.cmp(&b.due_at));
    Ok(todos)
}

fn todo_row(item: PlannerItem) -> TodoItem {
    let status = item.submissions.unwrap_or_default();
    TodoItem {
        course_name: item.context_name.unwrap_or_default(),
        title: item.plannable.title,
        kind: item.plannable_type,
        due_at: item.plannable_date,
        points_possible: item.plannable.points_possible,
        submitted: status.submitted,
        missing: status.missing,
        graded: status.graded,
        url: item.html_url.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Plannable, PlannerSubmissionStatus};

    fn planner_item(title: &str, date: &str, submitted: Option<bool>) -> PlannerItem {
        PlannerItem {
            context_name: Some("Biology".to_string()),
            plannable_type: "assignment".to_string(),
            plannable: Plannable {
                title: title.to_string(),
                points_possible: Some(10.0),
            },
            plannable_date: date.parse().unwrap(),
            submissions: submitted.map(|s| PlannerSubmissionStatus {
                submitted: s,
                ..PlannerSubmissionStatus::default()
            }),
            html_url: None,
        }
    }

    #[test]
    fn boolean_false_submissions_means_not_submitted() {
        let row = todo_row(planner_item("Lab 1", "2024-03-04T23:59:00Z", None));
        assert!(!row.submitted);
        assert!(!row.missing);
    }

    #[test]
    fn hide_submitted_filters_only_submitted_rows() {
        let mut rows: Vec<TodoItem> = vec![
            todo_row(planner_item("done", "2024-03-04T23:59:00Z", Some(true))),
            todo_row(planner_item("open", "2024-03-05T23:59:00Z", Some(false))),
        ];
        rows.retain(|t| !t.submitted);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "open");
    }
}
