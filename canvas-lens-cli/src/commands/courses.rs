//! `courses` command.

use canvas_lens::services::courses::course_grades;
use canvas_lens::services::types::CourseGrade;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_score, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Course")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

impl From<&CourseGrade> for CourseRow {
    fn from(course: &CourseGrade) -> Self {
        Self {
            id: course.id,
            name: course.name.clone(),
            code: course.course_code.clone(),
            score: format_score(course.current_score),
            grade: course.current_grade.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn run(context: &CommandContext) -> CliResult<()> {
    let student = context.student()?;
    let courses = course_grades(&context.client, &student).await?;

    match context.format {
        OutputFormat::Json => print_json(&courses),
        OutputFormat::Table => {
            let rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
            print_table(rows, "No active courses");
            Ok(())
        }
    }
}
