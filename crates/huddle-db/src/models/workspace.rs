//! Workspace database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for workspaces table
#[derive(Debug, Clone, FromRow)]
pub struct WorkspaceModel {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub join_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
