//! `grades` and `stats` commands.

use canvas_lens::services::grades::{recent_grades, GradesOptions};
use canvas_lens::services::stats::{course_stats, StatsOptions};
use canvas_lens::services::types::{CourseStats, GradedAssignment};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, format_score, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct GradeRow {
    #[tabled(rename = "Graded")]
    graded: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Pct")]
    percentage: String,
    #[tabled(rename = "Late")]
    late: String,
}

impl From<&GradedAssignment> for GradeRow {
    fn from(item: &GradedAssignment) -> Self {
        Self {
            graded: format_date(item.graded_at),
            course: item.course_name.clone(),
            assignment: item.assignment_name.clone(),
            score: format!(
                "{}/{}",
                format_score(item.score),
                item.points_possible
            ),
            percentage: item
                .percentage
                .map(|p| format!("{p}%"))
                .unwrap_or_else(|| "-".to_string()),
            late: if item.late { "late" } else { "" }.to_string(),
        }
    }
}

pub async fn run(context: &CommandContext, days: i64, below: Option<f64>) -> CliResult<()> {
    let student = context.student()?;
    let items = recent_grades(
        &context.client,
        &student,
        &GradesOptions {
            days,
            below_percentage: below,
        },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<GradeRow> = items.iter().map(GradeRow::from).collect();
            print_table(rows, "No grades in this window");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Graded")]
    total: usize,
    #[tabled(rename = "Late")]
    late: usize,
    #[tabled(rename = "Late %")]
    late_pct: String,
    #[tabled(rename = "Missing")]
    missing: usize,
    #[tabled(rename = "Missing %")]
    missing_pct: String,
}

impl From<&CourseStats> for StatsRow {
    fn from(stats: &CourseStats) -> Self {
        Self {
            course: stats.course_name.clone(),
            total: stats.total,
            late: stats.late,
            late_pct: format!("{:.1}", stats.late_pct),
            missing: stats.missing,
            missing_pct: format!("{:.1}", stats.missing_pct),
        }
    }
}

pub async fn run_stats(context: &CommandContext, include_empty: bool) -> CliResult<()> {
    let student = context.student()?;
    let options = StatsOptions {
        hide_empty: !include_empty,
    };
    let stats = course_stats(&context.client, &student, &options).await?;

    match context.format {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Table => {
            let rows: Vec<StatsRow> = stats.iter().map(StatsRow::from).collect();
            print_table(rows, "No courses");
            Ok(())
        }
    }
}
