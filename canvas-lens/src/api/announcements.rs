//! Canvas Announcements API.

use chrono::{DateTime, Utc};

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::Announcement;

/// Options for [`list_announcements`].
#[derive(Debug, Default, Clone)]
pub struct AnnouncementOptions {
    /// Contexts to query, e.g. `course_123` (repeated `context_codes[]`)
    pub context_codes: Vec<String>,
    /// Only announcements posted at or after this time
    pub start_date: Option<DateTime<Utc>>,
    /// Only announcements posted at or before this time
    pub end_date: Option<DateTime<Utc>>,
}

/// List announcements for the given course contexts.
pub async fn list_announcements(
    client: &CanvasClient,
    options: &AnnouncementOptions,
) -> Result<Vec<Announcement>> {
    let mut query = Query::new().repeated("context_codes", &options.context_codes);
    if let Some(start) = options.start_date {
        query = query.scalar("start_date", start.to_rfc3339());
    }
    if let Some(end) = options.end_date {
        query = query.scalar("end_date", end.to_rfc3339());
    }

    client.get_all("/announcements", &query).await
}
