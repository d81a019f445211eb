//! `calendar` and `discussions` commands.

use canvas_lens::services::calendar::{calendar_events, CalendarEventsOptions};
use canvas_lens::services::discussions::{recent_discussions, DiscussionsOptions};
use canvas_lens::services::types::{CalendarEventItem, DiscussionItem};
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output::{format_date, print_json, print_table};

use super::CommandContext;

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Event")]
    title: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&CalendarEventItem> for EventRow {
    fn from(item: &CalendarEventItem) -> Self {
        Self {
            start: format_date(Some(item.start_at)),
            course: item.course_name.clone(),
            title: item.title.clone(),
            location: item.location_name.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn run(context: &CommandContext, days: i64, course_id: Option<u64>) -> CliResult<()> {
    let items =
        calendar_events(&context.client, &CalendarEventsOptions { days, course_id }).await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<EventRow> = items.iter().map(EventRow::from).collect();
            print_table(rows, "No events in this window");
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct DiscussionRow {
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Topic")]
    title: String,
    #[tabled(rename = "Replies")]
    replies: u32,
    #[tabled(rename = "Unread")]
    unread: u32,
    #[tabled(rename = "Graded")]
    graded: String,
}

impl From<&DiscussionItem> for DiscussionRow {
    fn from(item: &DiscussionItem) -> Self {
        Self {
            activity: format_date(item.last_reply_at.max(item.posted_at)),
            course: item.course_name.clone(),
            title: item.title.clone(),
            replies: item.reply_count,
            unread: item.unread_count,
            graded: if item.is_graded { "yes" } else { "no" }.to_string(),
        }
    }
}

pub async fn run_discussions(
    context: &CommandContext,
    days: i64,
    course_id: Option<u64>,
) -> CliResult<()> {
    let items =
        recent_discussions(&context.client, &DiscussionsOptions { days, course_id }).await?;

    match context.format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<DiscussionRow> = items.iter().map(DiscussionRow::from).collect();
            print_table(rows, "No recent discussion activity");
            Ok(())
        }
    }
}
