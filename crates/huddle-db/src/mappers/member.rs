//! Member entity <-> model mapper

use huddle_core::entities::{Member, MemberRole};
use huddle_core::error::DomainError;
use huddle_core::value_objects::{MemberId, UserId, WorkspaceId};

use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let role: MemberRole = model.role.parse().map_err(DomainError::DatabaseError)?;
        Ok(Member {
            id: MemberId::new(model.id),
            user_id: UserId::new(model.user_id),
            workspace_id: WorkspaceId::new(model.workspace_id),
            role,
            joined_at: model.joined_at,
        })
    }
}
