//! Non-assignment calendar events across the student's courses.

use std::collections::HashMap;

use chrono::{Duration, Utc};

use crate::api::calendar::{list_calendar_events, CalendarOptions};
use crate::client::CanvasClient;
use crate::error::Result;

use super::fan_out::CourseRef;
use super::students::active_course_refs;
use super::types::CalendarEventItem;
use super::upcoming::course_id_from_context;

const DESCRIPTION_LIMIT: usize = 200;

/// Options for [`calendar_events`].
#[derive(Debug, Clone)]
pub struct CalendarEventsOptions {
    /// Look-ahead window in days
    pub days: i64,
    /// Restrict to one course
    pub course_id: Option<u64>,
}

impl Default for CalendarEventsOptions {
    fn default() -> Self {
        Self {
            days: 14,
            course_id: None,
        }
    }
}

/// List active, non-assignment calendar events starting within the
/// look-ahead window, soonest first. Descriptions are truncated for
/// display.
pub async fn calendar_events(
    client: &CanvasClient,
    options: &CalendarEventsOptions,
) -> Result<Vec<CalendarEventItem>> {
    let courses = match options.course_id {
        Some(id) => {
            let course = crate::api::courses::require_course(client, id).await?;
            vec![CourseRef::from(&course)]
        }
        None => active_course_refs(client).await?,
    };
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let now = Utc::now();
    let events = list_calendar_events(
        client,
        &CalendarOptions {
            event_type: Some("event".to_string()),
            context_codes: courses.iter().map(|c| format!("course_{}", c.id)).collect(),
            start_date: Some(now),
            end_date: Some(now + Duration::days(options.days)),
        },
    )
    .await?;

    let names: HashMap<u64, &str> = courses.iter().map(|c| (c.id, c.name.as_str())).collect();
    let mut items: Vec<CalendarEventItem> = events
        .into_iter()
        .filter(|e| e.workflow_state == "active")
        // Undated events cannot be placed in the window.
        .filter_map(|e| {
            let start_at = e.start_at?;
            let course_id = course_id_from_context(&e.context_code).unwrap_or(0);
            Some(CalendarEventItem {
                id: e.id,
                title: e.title,
                description: e.description.map(|d| truncate(&d, DESCRIPTION_LIMIT)),
                start_at,
                end_at: e.end_at,
                location_name: e.location_name,
                location_address: e.location_address,
                course_id,
                course_name: names
                    .get(&course_id)
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                url: e.html_url,
            })
        })
        .collect();

    items.sort_by(|a, b| a.start_at.cmp(&b.start_at));
    Ok(items)
}

/// Truncate to at most `limit` characters on a char boundary, appending
/// an ellipsis when anything was cut.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_descriptions_pass_through() {
        assert_eq!(truncate("field trip", 200), "field trip");
    }

    #[test]
    fn long_descriptions_are_cut_with_ellipsis() {
        let long = "x".repeat(250);
        let cut = truncate(&long, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate(&text, 5), format!("{}...", "é".repeat(5)));
    }
}
