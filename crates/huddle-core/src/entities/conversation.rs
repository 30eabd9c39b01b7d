//! Conversation entity - private two-party thread within a workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ConversationId, MemberId, WorkspaceId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub workspace_id: WorkspaceId,
    pub member_one_id: MemberId,
    pub member_two_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(
        id: ConversationId,
        workspace_id: WorkspaceId,
        member_one_id: MemberId,
        member_two_id: MemberId,
    ) -> Self {
        Self {
            id,
            workspace_id,
            member_one_id,
            member_two_id,
            created_at: Utc::now(),
        }
    }

    /// Whether the member is one side of this pairing
    #[inline]
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.member_one_id == member_id || self.member_two_id == member_id
    }

    /// Whether this conversation pairs `a` with `b`, in either order
    pub fn pairs(&self, a: MemberId, b: MemberId) -> bool {
        (self.member_one_id == a && self.member_two_id == b)
            || (self.member_one_id == b && self.member_two_id == a)
    }
}
