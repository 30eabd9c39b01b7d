//! Reaction entity - a member's emoji on a message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{MemberId, MessageId, ReactionId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub workspace_id: WorkspaceId,
    pub message_id: MessageId,
    pub member_id: MemberId,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(
        id: ReactionId,
        workspace_id: WorkspaceId,
        message_id: MessageId,
        member_id: MemberId,
        value: String,
    ) -> Self {
        Self {
            id,
            workspace_id,
            message_id,
            member_id,
            value,
            created_at: Utc::now(),
        }
    }
}
