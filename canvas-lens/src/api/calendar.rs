//! Canvas Calendar Events API.

use chrono::{DateTime, Utc};

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::CalendarEvent;

/// Options for [`list_calendar_events`].
#[derive(Debug, Default, Clone)]
pub struct CalendarOptions {
    /// `event` to exclude assignment shadows, `assignment` for only those
    pub event_type: Option<String>,
    /// Contexts to query, e.g. `course_123` (repeated `context_codes[]`);
    /// empty means the caller's own calendar
    pub context_codes: Vec<String>,
    /// Window start
    pub start_date: Option<DateTime<Utc>>,
    /// Window end
    pub end_date: Option<DateTime<Utc>>,
}

/// List calendar events.
pub async fn list_calendar_events(
    client: &CanvasClient,
    options: &CalendarOptions,
) -> Result<Vec<CalendarEvent>> {
    let mut query = Query::new();
    if let Some(event_type) = &options.event_type {
        query = query.scalar("type", event_type);
    }
    if !options.context_codes.is_empty() {
        query = query.repeated("context_codes", &options.context_codes);
    }
    if let Some(start) = options.start_date {
        query = query.scalar("start_date", start.to_rfc3339());
    }
    if let Some(end) = options.end_date {
        query = query.scalar("end_date", end.to_rfc3339());
    }

    client.get_all("/calendar_events", &query).await
}
