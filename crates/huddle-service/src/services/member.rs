//! Member service
//!
//! Membership reads for workspace members, role changes by admins, and
//! removal by an admin or by the member leaving. A workspace always keeps at
//! least one admin.

use huddle_core::{DomainError, Member, MemberId, MemberRole, Session, WorkspaceId};
use tracing::{info, instrument};

use crate::dto::{MemberResponse, MemberWithUser, UpdateMemberRequest};
use crate::live::Collection;

use super::access::AccessControl;
use super::cascade::CascadeDelete;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn access(&self) -> AccessControl<'a> {
        AccessControl::new(self.ctx)
    }

    async fn find(&self, member_id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound.into())
    }

    async fn admin_count(&self, workspace_id: WorkspaceId) -> ServiceResult<usize> {
        let members = self.ctx.member_repo().find_by_workspace(workspace_id).await?;
        Ok(members.iter().filter(|m| m.is_admin()).count())
    }

    async fn with_users(&self, members: Vec<Member>) -> ServiceResult<Vec<MemberWithUser>> {
        let ids: Vec<_> = members.iter().map(|m| m.user_id).collect();
        let users = self.ctx.user_repo().find_by_ids(&ids).await?;
        Ok(members
            .into_iter()
            .map(|member| {
                let user = users.iter().find(|u| u.id == member.user_id).cloned();
                MemberWithUser { member, user }
            })
            .collect())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The caller's own membership
    #[instrument(skip(self, session))]
    pub async fn current(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Option<MemberResponse>> {
        let member = self.access().viewer(session, workspace_id).await?;
        Ok(member.as_ref().map(MemberResponse::from))
    }

    /// Every member of the workspace with their user record
    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        workspace_id: WorkspaceId,
    ) -> ServiceResult<Vec<MemberResponse>> {
        if self.access().viewer(session, workspace_id).await?.is_none() {
            return Ok(Vec::new());
        }
        let members = self.ctx.member_repo().find_by_workspace(workspace_id).await?;
        let members = self.with_users(members).await?;
        Ok(members.iter().map(MemberResponse::from).collect())
    }

    /// A member of a workspace the caller belongs to
    #[instrument(skip(self, session))]
    pub async fn get_by_id(
        &self,
        session: &Session,
        member_id: MemberId,
    ) -> ServiceResult<Option<MemberResponse>> {
        if !session.is_authenticated() {
            return Ok(None);
        }
        let Some(member) = self.ctx.member_repo().find_by_id(member_id).await? else {
            return Ok(None);
        };
        if self
            .access()
            .viewer(session, member.workspace_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        let member = self.with_users(vec![member]).await?;
        Ok(member.first().map(MemberResponse::from))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Change a member's role (admin)
    #[instrument(skip(self, session, request))]
    pub async fn update(
        &self,
        session: &Session,
        member_id: MemberId,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberId> {
        let user_id = self.access().require_user(session)?;
        let mut member = self.find(member_id).await?;
        self.access()
            .require_admin(user_id, member.workspace_id)
            .await?;

        if member.role == MemberRole::Admin
            && request.role == MemberRole::Member
            && self.admin_count(member.workspace_id).await? <= 1
        {
            return Err(DomainError::LastAdmin.into());
        }

        member.role = request.role;
        self.ctx.member_repo().update(&member).await?;
        self.ctx.publish(Collection::Members, member.workspace_id);

        info!(member_id = %member_id, role = %member.role, "Member updated successfully");
        Ok(member_id)
    }

    /// Remove a member (admin) or leave (the member themself)
    ///
    /// Takes the member's messages, reactions and conversations with it.
    #[instrument(skip(self, session))]
    pub async fn remove(&self, session: &Session, member_id: MemberId) -> ServiceResult<MemberId> {
        let user_id = self.access().require_user(session)?;
        let member = self.find(member_id).await?;
        let caller = self
            .access()
            .require_member(user_id, member.workspace_id)
            .await?;

        let leaving = caller.id == member.id;
        if !leaving {
            self.access()
                .require_admin(user_id, member.workspace_id)
                .await?;
            let workspace = self
                .ctx
                .workspace_repo()
                .find_by_id(member.workspace_id)
                .await?;
            if workspace.is_some_and(|w| w.is_owner(member.user_id)) {
                return Err(DomainError::CannotRemoveOwner.into());
            }
        }
        if member.is_admin() && self.admin_count(member.workspace_id).await? <= 1 {
            return Err(DomainError::LastAdmin.into());
        }

        CascadeDelete::new(self.ctx).member(&member).await?;

        info!(member_id = %member_id, leaving, "Member removed successfully");
        Ok(member_id)
    }
}
