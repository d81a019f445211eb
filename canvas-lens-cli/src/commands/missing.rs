//! `missing` and `unsubmitted` commands.

use canvas_lens::services::missing::{
    missing_counts_by_course, missing_work, MissingOptions,
};
use canvas_lens::services::types::{MissingWorkItem, UnsubmittedAssignment, WorkSource};
use canvas_lens::services::unsubmitted::{unsubmitted_assignments, UnsubmittedOptions};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, format_points, print_json, print_table};

use super::CommandContext;

pub struct MissingArgs {
    pub summary: bool,
    pub include_unsubmitted: bool,
    pub all_grading_periods: bool,
    pub course_id: Option<u64>,
}

#[derive(Tabled)]
struct MissingRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&MissingWorkItem> for MissingRow {
    fn from(item: &MissingWorkItem) -> Self {
        Self {
            course: item.course_name.clone(),
            assignment: item.name.clone(),
            due: format_date(item.due_at),
            points: format_points(item.points_possible),
            source: match item.source {
                WorkSource::Missing => "missing".to_string(),
                WorkSource::Unsubmitted => "unsubmitted".to_string(),
            },
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Missing")]
    count: usize,
}

pub async fn run(context: &CommandContext, args: &MissingArgs) -> CliResult<()> {
    let student = context.student()?;
    let options = MissingOptions {
        course_id: args.course_id,
        all_grading_periods: args.all_grading_periods,
    };

    if args.summary {
        let counts = missing_counts_by_course(&context.client, &student, &options).await?;
        return match context.format {
            OutputFormat::Json => print_json(&counts),
            OutputFormat::Table => {
                let rows: Vec<SummaryRow> = counts
                    .iter()
                    .map(|c| SummaryRow {
                        course: c.course_name.clone(),
                        count: c.count,
                    })
                    .collect();
                print_table(rows, "No missing assignments");
                Ok(())
            }
        };
    }

    let items = missing_work(
        &context.client,
        &student,
        &options,
        args.include_unsubmitted,
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<MissingRow> = items.iter().map(MissingRow::from).collect();
            print_table(rows, "No missing assignments");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct UnsubmittedRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Points")]
    points: String,
}

impl From<&UnsubmittedAssignment> for UnsubmittedRow {
    fn from(item: &UnsubmittedAssignment) -> Self {
        Self {
            course: item.course_name.clone(),
            assignment: item.name.clone(),
            due: format_date(item.due_at),
            points: format_points(item.points_possible),
        }
    }
}

pub async fn run_unsubmitted(
    context: &CommandContext,
    all_grading_periods: bool,
    course_id: Option<u64>,
) -> CliResult<()> {
    let student = context.student()?;
    let items = unsubmitted_assignments(
        &context.client,
        &student,
        &UnsubmittedOptions {
            course_id,
            all_grading_periods,
        },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<UnsubmittedRow> = items.iter().map(UnsubmittedRow::from).collect();
            print_table(rows, "No unsubmitted past-due assignments");
            Ok(())
        }
    }
}
