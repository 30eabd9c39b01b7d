//! Message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
///
/// Exactly one of `channel_id` and `conversation_id` is set.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub workspace_id: i64,
    pub author_member_id: i64,
    pub body: String,
    pub image: Option<String>,
    pub channel_id: Option<i64>,
    pub conversation_id: Option<i64>,
    pub parent_message_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Aggregate over the replies of one thread
#[derive(Debug, Clone, FromRow)]
pub struct ThreadStatsModel {
    pub reply_count: i64,
    pub last_reply_at: Option<DateTime<Utc>>,
}
