//! `feedback` command.

use canvas_lens::services::feedback::{recent_feedback, FeedbackOptions};
use canvas_lens::services::types::FeedbackItem;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, format_score, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct FeedbackRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "From")]
    author: String,
    #[tabled(rename = "Comment")]
    comment: String,
    #[tabled(rename = "Score")]
    score: String,
}

impl From<&FeedbackItem> for FeedbackRow {
    fn from(item: &FeedbackItem) -> Self {
        Self {
            date: format_date(Some(item.comment_date)),
            course: item.course_name.clone(),
            assignment: item.assignment_name.clone(),
            author: item.author_name.clone(),
            comment: item.comment_text.clone(),
            score: format_score(item.student_score),
        }
    }
}

pub async fn run(context: &CommandContext, days: i64, course_id: Option<u64>) -> CliResult<()> {
    let student = context.student()?;
    let items = recent_feedback(
        &context.client,
        &student,
        &FeedbackOptions { days, course_id },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<FeedbackRow> = items.iter().map(FeedbackRow::from).collect();
            print_table(rows, "No teacher feedback in this window");
            Ok(())
        }
    }
}
