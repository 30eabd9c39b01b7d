//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub workspace_id: i64,
    pub message_id: i64,
    pub member_id: i64,
    pub value: String,
    pub created_at: DateTime<Utc>,
}
