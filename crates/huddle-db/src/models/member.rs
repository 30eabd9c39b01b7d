//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub user_id: i64,
    pub workspace_id: i64,
    /// 'admin' or 'member', enforced by a CHECK constraint
    pub role: String,
    pub joined_at: DateTime<Utc>,
}
