//! `people` and `students` commands.

use canvas_lens::services::people::course_people;
use canvas_lens::services::students::observed_students;
use canvas_lens::services::types::PersonItem;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Courses")]
    courses: String,
}

impl From<&PersonItem> for PersonRow {
    fn from(person: &PersonItem) -> Self {
        Self {
            name: person.name.clone(),
            role: person.role.clone(),
            email: person.email.clone().unwrap_or_else(|| "-".to_string()),
            courses: person
                .courses
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

pub async fn run(context: &CommandContext, course_id: Option<u64>) -> CliResult<()> {
    let people = course_people(&context.client, course_id).await?;

    match context.format {
        OutputFormat::Json => print_json(&people),
        OutputFormat::Table => {
            let rows: Vec<PersonRow> = people.iter().map(PersonRow::from).collect();
            print_table(rows, "No teachers or TAs found");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
}

pub async fn run_students(context: &CommandContext) -> CliResult<()> {
    let students = observed_students(&context.client).await?;

    match context.format {
        OutputFormat::Json => print_json(&students),
        OutputFormat::Table => {
            let rows: Vec<StudentRow> = students
                .iter()
                .map(|s| StudentRow {
                    id: s.id,
                    name: s.name.clone(),
                })
                .collect();
            print_table(rows, "No observed students");
            Ok(())
        }
    }
}
