//! `status` command, single- and multi-student.

use canvas_lens::services::status::{
    comprehensive_status, multi_student_status, StatusOptions,
};
use canvas_lens::services::types::ComprehensiveStatus;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, format_score, print_header, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct CourseLine {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

#[derive(Tabled)]
struct WorkLine {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Assignment")]
    assignment: String,
    #[tabled(rename = "Due")]
    due: String,
}

fn print_status(status: &ComprehensiveStatus) {
    println!(
        "{} courses | {} missing | {} due soon | {} recent low grades",
        status.summary.total_courses,
        status.summary.missing_assignments,
        status.summary.upcoming_assignments,
        status.summary.recent_low_grades,
    );
    println!();

    print_header("Grades");
    let courses: Vec<CourseLine> = status
        .courses
        .iter()
        .map(|c| CourseLine {
            course: c.name.clone(),
            score: format_score(c.current_score),
            grade: c.current_grade.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    print_table(courses, "No active courses");
    println!();

    print_header("Missing");
    let missing: Vec<WorkLine> = status
        .missing_assignments
        .iter()
        .map(|m| WorkLine {
            course: m.course_name.clone(),
            assignment: m.name.clone(),
            due: format_date(m.due_at),
        })
        .collect();
    print_table(missing, "Nothing missing");
    println!();

    print_header("Due soon");
    let upcoming: Vec<WorkLine> = status
        .upcoming_assignments
        .iter()
        .map(|d| WorkLine {
            course: d.course_name.clone(),
            assignment: d.assignment_name.clone(),
            due: format_date(Some(d.due_at)),
        })
        .collect();
    print_table(upcoming, "Nothing due soon");
    println!();

    print_header("Recent low grades");
    let low: Vec<WorkLine> = status
        .recent_low_grades
        .iter()
        .map(|g| WorkLine {
            course: g.course_name.clone(),
            assignment: g.assignment_name.clone(),
            due: format_date(g.graded_at),
        })
        .collect();
    print_table(low, "No recent low grades");
}

pub async fn run(context: &CommandContext, all_students: bool) -> CliResult<()> {
    let options = StatusOptions::default();

    if all_students {
        let statuses = multi_student_status(&context.client, &options).await?;
        return match context.format {
            OutputFormat::Json => print_json(&statuses),
            OutputFormat::Table => {
                for student in &statuses {
                    print_header(&format!(
                        "=== {} (id {}) ===",
                        student.student_name, student.student_id
                    ));
                    print_status(&student.status);
                    println!();
                }
                Ok(())
            }
        };
    }

    let student = context.student()?;
    let status = comprehensive_status(&context.client, &student, &options).await?;

    match context.format {
        OutputFormat::Json => print_json(&status),
        OutputFormat::Table => {
            print_status(&status);
            Ok(())
        }
    }
}
