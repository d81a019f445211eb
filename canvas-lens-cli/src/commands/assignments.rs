//! `assignments`, `due`, `upcoming`, and `todo` commands.

use canvas_lens::api::assignments::AssignmentBucket;
use canvas_lens::services::assignments::{assignment_rows, AssignmentListOptions};
use canvas_lens::services::due::{due_assignments, DueOptions};
use canvas_lens::services::todo::{todo_items, TodoOptions};
use canvas_lens::services::types::{AssignmentRow, DueAssignment, TodoItem};
use canvas_lens::services::upcoming::upcoming_assignments;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{
    check_mark, format_date, format_points, format_score, print_header, print_json, print_table,
};

use super::CommandContext;

pub struct AssignmentsArgs {
    pub course_id: Option<u64>,
    pub bucket: Option<String>,
    pub due_this_week: bool,
    pub search: Option<String>,
}

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl From<&AssignmentRow> for ListRow {
    fn from(row: &AssignmentRow) -> Self {
        Self {
            course: row.course_name.clone(),
            assignment: row.name.clone(),
            due: format_date(row.due_at),
            points: format_points(row.points_possible),
            score: format_score(row.score),
            submitted: check_mark(row.submitted),
        }
    }
}

pub async fn run(context: &CommandContext, args: &AssignmentsArgs) -> CliResult<()> {
    let bucket = match args.bucket.as_deref() {
        Some(name) => Some(
            AssignmentBucket::parse(name)
                .ok_or_else(|| CliError::config(format!("unknown bucket: {name}")))?,
        ),
        None => None,
    };

    let rows = assignment_rows(
        &context.client,
        &AssignmentListOptions {
            course_id: args.course_id,
            bucket,
            due_this_week: args.due_this_week,
            search_term: args.search.clone(),
        },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let rows: Vec<ListRow> = rows.iter().map(ListRow::from).collect();
            print_table(rows, "No assignments found");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl From<&DueAssignment> for DueRow {
    fn from(item: &DueAssignment) -> Self {
        Self {
            due: format_date(Some(item.due_at)),
            course: item.course_name.clone(),
            assignment: item.assignment_name.clone(),
            points: format_points(item.points_possible),
            submitted: check_mark(item.submitted),
        }
    }
}

pub async fn run_due(context: &CommandContext, days: i64, hide_graded: bool) -> CliResult<()> {
    let student = context.student()?;
    let items = due_assignments(
        &context.client,
        &student,
        &DueOptions { days, hide_graded },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<DueRow> = items.iter().map(DueRow::from).collect();
            print_table(rows, "Nothing due in this window");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct UpcomingRow {
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

pub async fn run_upcoming(context: &CommandContext, course_id: Option<u64>) -> CliResult<()> {
    let courses = upcoming_assignments(&context.client, course_id).await?;

    match context.format {
        OutputFormat::Json => print_json(&courses),
        OutputFormat::Table => {
            for course in courses {
                print_header(&course.course_name);
                let rows: Vec<UpcomingRow> = course
                    .assignments
                    .iter()
                    .map(|a| UpcomingRow {
                        assignment: a.name.clone(),
                        due: format_date(a.due_at),
                        points: format_points(a.points_possible),
                        submitted: check_mark(a.submitted),
                    })
                    .collect();
                print_table(rows, "  nothing upcoming");
                println!();
            }
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
    #[tabled(rename = "Missing")]
    missing: String,
}

impl From<&TodoItem> for TodoRow {
    fn from(item: &TodoItem) -> Self {
        Self {
            due: format_date(Some(item.due_at)),
            course: item.course_name.clone(),
            item: item.title.clone(),
            kind: item.kind.clone(),
            submitted: check_mark(item.submitted),
            missing: check_mark(item.missing),
        }
    }
}

pub async fn run_todo(context: &CommandContext, days: i64, hide_submitted: bool) -> CliResult<()> {
    let student = context.student()?;
    let items = todo_items(
        &context.client,
        &student,
        &TodoOptions {
            days,
            hide_submitted,
        },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<TodoRow> = items.iter().map(TodoRow::from).collect();
            print_table(rows, "Nothing planned in this window");
            Ok(())
        }
    }
}
