//! `announcements`, `inbox`, and `communications` commands.

use canvas_lens::services::communications::{
    inbox, recent_announcements, teacher_communications, AnnouncementsOptions, InboxOptions,
};
use canvas_lens::services::types::{AnnouncementItem, InboxItem};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, print_header, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct AnnouncementRow {
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "From")]
    author: String,
}

impl From<&AnnouncementItem> for AnnouncementRow {
    fn from(item: &AnnouncementItem) -> Self {
        Self {
            posted: format_date(Some(item.posted_at)),
            course: item.course_name.clone(),
            title: item.title.clone(),
            author: item.author_name.clone(),
        }
    }
}

#[derive(Tabled)]
struct InboxRow {
    #[tabled(rename = "Last message")]
    last_message_at: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "With")]
    participants: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Msgs")]
    count: u32,
}

impl From<&InboxItem> for InboxRow {
    fn from(item: &InboxItem) -> Self {
        Self {
            last_message_at: format_date(item.last_message_at),
            subject: item.subject.clone().unwrap_or_else(|| "(no subject)".to_string()),
            participants: item.participants.join(", "),
            state: item.workflow_state.clone(),
            count: item.message_count,
        }
    }
}

pub async fn run_announcements(
    context: &CommandContext,
    days: i64,
    course_id: Option<u64>,
) -> CliResult<()> {
    let items =
        recent_announcements(&context.client, &AnnouncementsOptions { days, course_id }).await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<AnnouncementRow> = items.iter().map(AnnouncementRow::from).collect();
            print_table(rows, "No announcements in this window");
            Ok(())
        }
    }
}

pub async fn run_inbox(
    context: &CommandContext,
    scope: Option<String>,
    course_id: Option<u64>,
) -> CliResult<()> {
    let items = inbox(&context.client, &InboxOptions { scope, course_id }).await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<InboxRow> = items.iter().map(InboxRow::from).collect();
            print_table(rows, "Inbox is empty");
            Ok(())
        }
    }
}

pub async fn run_communications(
    context: &CommandContext,
    days: i64,
    course_id: Option<u64>,
) -> CliResult<()> {
    let communications = teacher_communications(
        &context.client,
        &AnnouncementsOptions { days, course_id },
        &InboxOptions {
            scope: None,
            course_id,
        },
    )
    .await?;

    match context.format {
        OutputFormat::Json => print_json(&communications),
        OutputFormat::Table => {
            print_header("Announcements");
            let rows: Vec<AnnouncementRow> = communications
                .announcements
                .iter()
                .map(AnnouncementRow::from)
                .collect();
            print_table(rows, "No announcements in this window");
            println!();

            print_header("Inbox");
            let rows: Vec<InboxRow> =
                communications.inbox.iter().map(InboxRow::from).collect();
            print_table(rows, "Inbox is empty");
            Ok(())
        }
    }
}
