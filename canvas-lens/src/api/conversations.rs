//! Canvas Conversations API (the user-scoped inbox).

use crate::client::{CanvasClient, Query};
use crate::error::Result;
use crate::types::Conversation;

/// Options for [`list_conversations`].
#[derive(Debug, Default, Clone)]
pub struct ConversationOptions {
    /// `inbox`, `unread`, `archived`, `starred`, or `sent`
    pub scope: Option<String>,
    /// Context filters, e.g. `course_123` (repeated `filter[]`)
    pub filter: Vec<String>,
}

/// List conversations for the authenticated user.
///
/// Fetching never marks messages read: `auto_mark_as_read=false` goes out
/// on every request. Observer accounts see their own inbox, not the
/// student's.
pub async fn list_conversations(
    client: &CanvasClient,
    options: &ConversationOptions,
) -> Result<Vec<Conversation>> {
    let mut query = Query::new().flag("auto_mark_as_read", false);
    if let Some(scope) = &options.scope {
        query = query.scalar("scope", scope);
    }
    if !options.filter.is_empty() {
        query = query.repeated("filter", &options.filter);
    }

    client.get_all("/conversations", &query).await
}
