//! Workspace entity - top-level tenant container

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{JoinCode, UserId, WorkspaceId};

/// Workspace entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub owner_id: UserId,
    pub join_code: JoinCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Name of the channel every new workspace starts with
    pub const DEFAULT_CHANNEL: &'static str = "general";

    /// Create a new workspace with a freshly generated join code
    pub fn new(id: WorkspaceId, name: String, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            join_code: JoinCode::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Replace the join code; the previous code stops working immediately
    pub fn regenerate_join_code(&mut self) -> &JoinCode {
        self.join_code = JoinCode::generate();
        self.updated_at = Utc::now();
        &self.join_code
    }
}
